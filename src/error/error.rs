//! Error types and handling for AuthGate

use thiserror::Error;

/// Result type alias for AuthGate operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Main error type for AuthGate
#[derive(Error, Debug)]
pub enum AuthError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Credential extraction errors
    #[error("Credential error: {message}")]
    Credential { message: String },

    /// Credential extraction requested from a transport location the engine
    /// cannot read. Surfaced to the caller and aborts the decision.
    #[error("Unsupported credential location: {location}")]
    UnsupportedLocation { location: String },

    /// Endpoint source errors (a cache or database extraction handler failed)
    #[error("Endpoint source error: {kind}: {message}")]
    Source { kind: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a credential extraction error
    pub fn credential<S: Into<String>>(message: S) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Create an unsupported credential location error
    pub fn unsupported_location<S: Into<String>>(location: S) -> Self {
        Self::UnsupportedLocation {
            location: location.into(),
        }
    }

    /// Create an endpoint source error
    pub fn source<S: Into<String>>(kind: S, message: S) -> Self {
        Self::Source {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            AuthError::Config { .. } => "config",
            AuthError::Credential { .. } => "credential",
            AuthError::UnsupportedLocation { .. } => "unsupported_location",
            AuthError::Source { .. } => "source",
            AuthError::Io(_) => "io",
            AuthError::Serde(_) => "serialization",
            AuthError::Yaml(_) => "yaml",
            AuthError::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::unsupported_location("path");
        assert_eq!(err.to_string(), "Unsupported credential location: path");

        let err = AuthError::source("database", "connection refused");
        assert_eq!(
            err.to_string(),
            "Endpoint source error: database: connection refused"
        );
    }

    #[test]
    fn test_error_category() {
        assert_eq!(AuthError::config("bad").category(), "config");
        assert_eq!(
            AuthError::unsupported_location("path").category(),
            "unsupported_location"
        );
        assert_eq!(AuthError::source("cache", "boom").category(), "source");
    }
}
