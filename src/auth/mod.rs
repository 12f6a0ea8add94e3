//! Authorization engine for AuthGate
//!
//! This module provides the decision engine a host pipeline installs in
//! front of its route handlers: credential extraction from the request
//! transport, the source handler interface, the ordered-chain evaluator,
//! and the engine facade.

pub mod credentials;
pub mod engine;
pub mod evaluator;
pub mod sources;

pub use credentials::CredentialLocator;
pub use engine::AuthEngine;
pub use evaluator::{SourceEvaluator, SourceOutcome};
pub use sources::{EndpointSource, ExtractHandler, HandlerSource};
