//! Permission rule and route identity types

use actix_web::HttpRequest;
use regex::Regex;

use crate::config::{ACTION_ROUTE_KEY, CONTROLLER_ROUTE_KEY};

/// An exact controller/action permission rule
#[derive(Debug, Clone)]
pub struct EndpointEntry {
    /// Controller identifier the rule was declared for
    pub controller: String,
    /// Action name, or the configured wildcard marker for whole-controller
    /// rules
    pub action: String,
    /// HTTP methods the rule applies to (case-insensitive)
    pub methods: Vec<String>,
    /// Whether authenticated access is allowed
    pub is_allow: bool,
    /// Whether guest (unauthenticated) access is allowed
    pub allow_guest: bool,
}

impl EndpointEntry {
    /// Rule allowing authenticated access to one controller action
    pub fn allow(
        controller: impl Into<String>,
        action: impl Into<String>,
        methods: Vec<String>,
    ) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            methods,
            is_allow: true,
            allow_guest: false,
        }
    }

    /// Rule allowing guest access to one controller action
    pub fn guest(
        controller: impl Into<String>,
        action: impl Into<String>,
        methods: Vec<String>,
    ) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            methods,
            is_allow: false,
            allow_guest: true,
        }
    }

    /// Whether this rule's method set contains `method` (case-insensitive)
    pub fn allows_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }
}

/// A pattern permission rule matched against `"<controller>.<action>"`
#[derive(Debug, Clone)]
pub struct PatternEntry {
    /// Compiled pattern applied to the lower-cased match subject
    pub pattern: Regex,
    /// Whether authenticated access is allowed
    pub is_allow: bool,
    /// Whether guest (unauthenticated) access is allowed
    pub allow_guest: bool,
}

/// A single permission rule supplied by an authorization source
///
/// Sources may mix both kinds in one list; the matcher dispatches on the
/// variant.
#[derive(Debug, Clone)]
pub enum EndpointRule {
    /// Rule addressed by exact controller/action attributes
    Endpoint(EndpointEntry),
    /// Rule addressed by a compiled pattern
    Pattern(PatternEntry),
}

impl EndpointRule {
    /// This rule as an exact entry, if it is one
    pub fn as_endpoint(&self) -> Option<&EndpointEntry> {
        match self {
            EndpointRule::Endpoint(entry) => Some(entry),
            EndpointRule::Pattern(_) => None,
        }
    }

    /// This rule as a pattern entry, if it is one
    pub fn as_pattern(&self) -> Option<&PatternEntry> {
        match self {
            EndpointRule::Endpoint(_) => None,
            EndpointRule::Pattern(entry) => Some(entry),
        }
    }
}

/// Route identity of the current request, as reported by the routing layer
///
/// A request whose controller or action the routing layer could not resolve
/// is outside the engine's monitored scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteIdentity {
    /// Controller route value, if resolved
    pub controller: Option<String>,
    /// Action route value, if resolved
    pub action: Option<String>,
    /// HTTP method of the request
    pub method: String,
}

impl RouteIdentity {
    /// Identity with both names resolved
    pub fn new(
        controller: impl Into<String>,
        action: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            controller: Some(controller.into()),
            action: Some(action.into()),
            method: method.into(),
        }
    }

    /// Derive the identity from a matched actix route
    ///
    /// Controller and action come from the `{controller}` and `{action}` path
    /// segments of the matched route pattern. Hosts with differently shaped
    /// routes construct the identity directly instead.
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            controller: req
                .match_info()
                .get(CONTROLLER_ROUTE_KEY)
                .map(|v| v.to_string()),
            action: req.match_info().get(ACTION_ROUTE_KEY).map(|v| v.to_string()),
            method: req.method().as_str().to_string(),
        }
    }

    /// Lower-cased controller and action names, when both are resolved and
    /// non-empty
    pub fn normalized_names(&self) -> Option<(String, String)> {
        match (self.controller.as_deref(), self.action.as_deref()) {
            (Some(controller), Some(action)) if !controller.is_empty() && !action.is_empty() => {
                Some((controller.to_lowercase(), action.to_lowercase()))
            }
            _ => None,
        }
    }
}
