//! AuthGate - Endpoint authorization decision engine for HTTP request pipelines
//!
//! This crate decides whether an inbound HTTP request may proceed to its
//! target route handler. An ordered chain of authorization sources
//! (auth-center, cache, database, static default) is consulted once per
//! request; the first source with an opinion produces the final verdict,
//! and a request no source claims is denied.

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;

pub use auth::{
    AuthEngine, CredentialLocator, EndpointSource, ExtractHandler, HandlerSource, SourceEvaluator,
    SourceOutcome,
};
pub use config::{AccessSource, AuthConfig, CredentialLocation, EndpointRuleConfig};
pub use endpoint::{
    AccessCodeRegistry, EndpointEntry, EndpointMatcher, EndpointRule, PatternEntry, RouteIdentity,
};
pub use error::{AuthError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "authgate.yaml";
