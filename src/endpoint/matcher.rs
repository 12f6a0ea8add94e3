//! Endpoint matching between a route identity and permission rules
//!
//! Matching runs in two tiers. The exact tier searches attribute rules for
//! the first entry naming the route's controller and action under the current
//! method, falling back to the controller's wildcard rule when no
//! action-level entry exists. The pattern tier matches compiled regexes
//! against the lower-cased `"<controller>.<action>"` subject. A matching
//! entry only ever produces an allow; denial happens by exhaustion.

use tracing::trace;

use crate::endpoint::types::{EndpointEntry, EndpointRule, RouteIdentity};

/// Resolves allow/deny verdicts for a route against a permission rule list
#[derive(Debug, Clone)]
pub struct EndpointMatcher {
    /// Suffix appended to the route controller when resolving wildcard rules
    controller_suffix: String,
    /// Action marker of whole-controller rules
    wildcard_action: String,
}

impl EndpointMatcher {
    /// Create a matcher with the configured wildcard conventions
    pub fn new(controller_suffix: impl Into<String>, wildcard_action: impl Into<String>) -> Self {
        Self {
            controller_suffix: controller_suffix.into(),
            wildcard_action: wildcard_action.into(),
        }
    }

    /// Decide whether the route named by `identity` may be accessed under
    /// `rules`.
    ///
    /// Pure and deterministic. An empty rule list denies; a route the routing
    /// layer could not name is allowed, since the engine does not govern
    /// routes it cannot identify.
    pub fn matches(&self, identity: &RouteIdentity, rules: &[EndpointRule]) -> bool {
        if rules.is_empty() {
            return false;
        }

        let (controller, action) = match identity.normalized_names() {
            Some(names) => names,
            None => {
                trace!("route identity unresolved, outside monitored scope");
                return true;
            }
        };

        let exact: Vec<&EndpointEntry> = rules
            .iter()
            .filter_map(EndpointRule::as_endpoint)
            .collect();
        if !exact.is_empty() {
            // Exact rules are method-scoped; a request without a method
            // cannot be matched against them.
            if identity.method.is_empty() {
                return false;
            }
            if self.exact_allows(&exact, &controller, &action, &identity.method) {
                return true;
            }
        }

        self.pattern_allows(rules, &controller, &action)
    }

    /// Exact tier. Returns true only on a definitive allow; everything else
    /// falls through to the pattern tier.
    fn exact_allows(
        &self,
        entries: &[&EndpointEntry],
        controller: &str,
        action: &str,
        method: &str,
    ) -> bool {
        // First entry wins: controller prefix-matched at position 0
        // (case-insensitive), action compared lower-cased.
        let hit = entries
            .iter()
            .filter(|e| e.allows_method(method))
            .find(|e| {
                e.controller.to_lowercase().starts_with(controller)
                    && e.action.to_lowercase() == action
            });

        if let Some(entry) = hit {
            // An entry with both flags down is no decision; the wildcard is
            // only consulted when no action-level entry matched at all.
            return entry.allow_guest || entry.is_allow;
        }

        // No action-level rule: look for the controller's wildcard rule.
        // The wildcard search is not method-filtered.
        let wildcard_name = format!("{}{}", controller, self.controller_suffix);
        let wildcard = entries.iter().find(|e| {
            e.controller.to_lowercase() == wildcard_name && e.action == self.wildcard_action
        });

        match wildcard {
            Some(entry) => {
                trace!(controller = %controller, "resolved via controller wildcard rule");
                entry.allow_guest || entry.is_allow
            }
            None => false,
        }
    }

    /// Pattern tier over the `"<controller>.<action>"` subject
    fn pattern_allows(&self, rules: &[EndpointRule], controller: &str, action: &str) -> bool {
        let mut patterns = rules.iter().filter_map(EndpointRule::as_pattern).peekable();
        if patterns.peek().is_none() {
            return false;
        }

        let subject = format!("{}.{}", controller, action);
        patterns.any(|p| p.pattern.is_match(&subject) && (p.allow_guest || p.is_allow))
    }
}
