//! Configuration management for the authorization engine
//!
//! Configuration is declarative: the credential transport, the ordered source
//! chain, and the static watch-list are all data. Pattern rules are compiled
//! once at load time so a bad regex fails construction instead of a request.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::endpoint::{EndpointEntry, EndpointRule, PatternEntry};
use crate::error::{AuthError, Result};

/// Route value key for the controller name
pub const CONTROLLER_ROUTE_KEY: &str = "controller";

/// Route value key for the action name
pub const ACTION_ROUTE_KEY: &str = "action";

/// Where the credential key is carried on the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialLocation {
    /// Query string parameter
    Query,
    /// Request header
    Header,
    /// Request cookie
    Cookie,
    /// Path segment. Listed for completeness; extraction from the path is
    /// not supported and fails the decision.
    Path,
}

impl CredentialLocation {
    /// Lowercase name used in configuration files and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialLocation::Query => "query",
            CredentialLocation::Header => "header",
            CredentialLocation::Cookie => "cookie",
            CredentialLocation::Path => "path",
        }
    }
}

impl fmt::Display for CredentialLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One origin of permission rules, consulted in configured order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// External authorization center. Reserved extension point; currently
    /// always defers to the next source.
    AuthCenter,
    /// Rules extracted from a cache by the bound cache handler
    Cache,
    /// Rules extracted from a database by the bound database handler
    Database,
    /// Terminal source backed by the static watch-list; never defers
    Default,
}

/// Declarative form of an endpoint permission rule
///
/// Rules are written in configuration and compiled into
/// [`EndpointRule`](crate::endpoint::EndpointRule) values at engine
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndpointRuleConfig {
    /// Exact controller/action rule
    Endpoint {
        /// Controller identifier the rule is declared for
        controller: String,
        /// Action name, or the wildcard marker for whole-controller rules
        action: String,
        /// HTTP methods the rule applies to (case-insensitive)
        #[serde(default)]
        methods: Vec<String>,
        /// Whether authenticated access is allowed
        #[serde(default)]
        is_allow: bool,
        /// Whether guest access is allowed
        #[serde(default)]
        allow_guest: bool,
    },
    /// Regex rule matched against the lower-cased `"<controller>.<action>"`
    Pattern {
        /// Regex source text
        pattern: String,
        /// Whether authenticated access is allowed
        #[serde(default)]
        is_allow: bool,
        /// Whether guest access is allowed
        #[serde(default)]
        allow_guest: bool,
    },
}

impl EndpointRuleConfig {
    /// Compile this declaration into a runtime rule
    pub fn compile(&self) -> Result<EndpointRule> {
        match self {
            EndpointRuleConfig::Endpoint {
                controller,
                action,
                methods,
                is_allow,
                allow_guest,
            } => Ok(EndpointRule::Endpoint(EndpointEntry {
                controller: controller.clone(),
                action: action.clone(),
                methods: methods.clone(),
                is_allow: *is_allow,
                allow_guest: *allow_guest,
            })),
            EndpointRuleConfig::Pattern {
                pattern,
                is_allow,
                allow_guest,
            } => {
                let compiled = regex::Regex::new(pattern).map_err(|e| {
                    AuthError::config(format!("invalid endpoint pattern '{}': {}", pattern, e))
                })?;
                Ok(EndpointRule::Pattern(PatternEntry {
                    pattern: compiled,
                    is_allow: *is_allow,
                    allow_guest: *allow_guest,
                }))
            }
        }
    }
}

/// Authorization engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the query parameter, header, or cookie carrying the credential
    #[serde(default = "default_credential_key")]
    pub credential_key: String,

    /// Transport location of the credential
    #[serde(default = "default_credential_location")]
    pub credential_location: CredentialLocation,

    /// Ordered source chain. A source is only consulted after every source
    /// before it has deferred.
    #[serde(default = "default_sources")]
    pub sources: Vec<AccessSource>,

    /// Static watch-list evaluated by the `Default` source
    #[serde(default)]
    pub watch_list: Vec<EndpointRuleConfig>,

    /// Suffix appended to a route's controller name when resolving
    /// whole-controller wildcard rules
    #[serde(default = "default_controller_suffix")]
    pub controller_suffix: String,

    /// Action marker of rules that govern every action of a controller
    #[serde(default = "default_wildcard_action")]
    pub wildcard_action: String,
}

fn default_credential_key() -> String {
    "access_token".to_string()
}

fn default_credential_location() -> CredentialLocation {
    CredentialLocation::Query
}

fn default_sources() -> Vec<AccessSource> {
    vec![
        AccessSource::Cache,
        AccessSource::Database,
        AccessSource::Default,
    ]
}

fn default_controller_suffix() -> String {
    "controller".to_string()
}

fn default_wildcard_action() -> String {
    "*".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential_key: default_credential_key(),
            credential_location: default_credential_location(),
            sources: default_sources(),
            watch_list: Vec::new(),
            controller_suffix: default_controller_suffix(),
            wildcard_action: default_wildcard_action(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from a YAML or JSON file and validate it
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.credential_key.trim().is_empty() {
            return Err(AuthError::config("credential_key must not be empty"));
        }

        if self.sources.is_empty() {
            return Err(AuthError::config(
                "sources must name at least one access source",
            ));
        }

        if self.wildcard_action.is_empty() {
            return Err(AuthError::config("wildcard_action must not be empty"));
        }

        // Surface bad watch-list patterns at load time
        for rule in &self.watch_list {
            rule.compile()?;
        }

        Ok(())
    }

    /// Compile the static watch-list into runtime rules
    pub fn compile_watch_list(&self) -> Result<Vec<EndpointRule>> {
        self.watch_list.iter().map(|r| r.compile()).collect()
    }
}
