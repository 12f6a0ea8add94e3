//! Error handling module for AuthGate
//!
//! This module provides the error types shared by every part of the engine.

mod error;

// Re-export the main error types and utilities
pub use error::{AuthError, Result};
