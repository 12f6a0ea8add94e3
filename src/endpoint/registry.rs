//! Process-wide access-code registry
//!
//! Memoizes authorization verdicts across requests. Entries are never
//! evicted; re-registering a code overwrites its verdict (last-write-wins).
//! Clones share the same underlying map, which is how one registry travels
//! between the engine, host cache handlers, and admin tooling.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

/// Fixed namespace identifier the registry is known under in diagnostics
pub const REGISTRY_NAMESPACE: &str = "auth_endpoints";

/// Concurrent access-code to verdict registry
///
/// The evaluation loop itself never reads the registry; it is the
/// memoization surface the engine exposes so host cache handlers and
/// external callers can seed or override verdicts.
#[derive(Debug, Clone, Default)]
pub struct AccessCodeRegistry {
    entries: Arc<DashMap<String, bool>>,
}

impl AccessCodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded from pre-existing cache state
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        Self {
            entries: Arc::new(entries.into_iter().collect()),
        }
    }

    /// Upsert the verdict for an access code
    pub fn register(&self, access_code: impl Into<String>, is_accepted: bool) {
        let access_code = access_code.into();
        debug!(
            namespace = REGISTRY_NAMESPACE,
            access_code = %access_code,
            is_accepted,
            "access code registered"
        );
        self.entries.insert(access_code, is_accepted);
    }

    /// Look up the cached verdict for an access code
    pub fn lookup(&self, access_code: &str) -> Option<bool> {
        self.entries.get(access_code).map(|entry| *entry.value())
    }

    /// Number of registered access codes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no access code has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time copy of every entry
    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
