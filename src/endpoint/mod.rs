//! Endpoint permission model for AuthGate
//!
//! This module holds the permission rule types supplied by authorization
//! sources, the matcher that resolves a request's route identity against
//! them, and the process-wide access-code registry.

pub mod matcher;
pub mod registry;
pub mod types;

pub use matcher::EndpointMatcher;
pub use registry::{AccessCodeRegistry, REGISTRY_NAMESPACE};
pub use types::{EndpointEntry, EndpointRule, PatternEntry, RouteIdentity};
