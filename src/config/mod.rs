//! Configuration module for AuthGate
//!
//! This module provides the authorization engine's configuration surface and
//! loading utilities.

mod config;

// Re-export the main configuration types
pub use config::{
    AccessSource, AuthConfig, CredentialLocation, EndpointRuleConfig, ACTION_ROUTE_KEY,
    CONTROLLER_ROUTE_KEY,
};
