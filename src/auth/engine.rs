//! Decision engine facade
//!
//! The single entry point the surrounding pipeline calls once per inbound
//! request: extract the credential key, drive the source chain, return the
//! verdict. The pipeline turns a `false` into its authorization-failure
//! response; errors propagate so the pipeline can fail closed.

use std::sync::Arc;

use actix_web::HttpRequest;
use tracing::{debug, warn};

use crate::auth::credentials::CredentialLocator;
use crate::auth::evaluator::SourceEvaluator;
use crate::auth::sources::EndpointSource;
use crate::config::{AccessSource, AuthConfig};
use crate::endpoint::AccessCodeRegistry;
use crate::error::Result;

/// Authorization decision engine
///
/// Holds the validated configuration, the credential locator, the source
/// evaluator, and the shared access-code registry. Constructed once at
/// startup and shared with every request handler.
pub struct AuthEngine {
    config: Arc<AuthConfig>,
    locator: CredentialLocator,
    evaluator: SourceEvaluator,
    registry: AccessCodeRegistry,
}

impl AuthEngine {
    /// Create an engine from configuration, with an empty registry
    pub fn new(config: AuthConfig) -> Result<Self> {
        Self::with_registry(config, AccessCodeRegistry::new())
    }

    /// Create an engine around pre-existing registry state
    pub fn with_registry(config: AuthConfig, registry: AccessCodeRegistry) -> Result<Self> {
        config.validate()?;

        if !config.sources.contains(&AccessSource::Default) {
            warn!("source chain has no terminal default source, exhausted chains will deny");
        }

        let config = Arc::new(config);
        let locator =
            CredentialLocator::new(config.credential_key.clone(), config.credential_location);
        let evaluator = SourceEvaluator::new(Arc::clone(&config))?;

        Ok(Self {
            config,
            locator,
            evaluator,
            registry,
        })
    }

    /// Bind the cache extraction handler
    pub fn with_cache_source(mut self, source: Arc<dyn EndpointSource>) -> Self {
        self.evaluator = self.evaluator.with_cache_source(source);
        self
    }

    /// Bind the database extraction handler
    pub fn with_database_source(mut self, source: Arc<dyn EndpointSource>) -> Self {
        self.evaluator = self.evaluator.with_database_source(source);
        self
    }

    /// Decide whether `req` may proceed to its route handler
    pub async fn authorize(&self, req: &HttpRequest) -> Result<bool> {
        let credential_key = self.locator.extract(req)?;
        let allowed = self.evaluator.evaluate(req, &credential_key).await?;

        debug!(path = %req.path(), allowed, "authorization decision");
        Ok(allowed)
    }

    /// Seed or override the cached verdict for an access code
    pub fn register_access_code(&self, access_code: impl Into<String>, is_accepted: bool) {
        self.registry.register(access_code, is_accepted);
    }

    /// The shared verdict registry
    pub fn registry(&self) -> &AccessCodeRegistry {
        &self.registry
    }

    /// The engine's configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sources::HandlerSource;
    use crate::config::{CredentialLocation, EndpointRuleConfig};
    use crate::error::AuthError;
    use actix_web::test::TestRequest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn watch_list_config() -> AuthConfig {
        AuthConfig {
            sources: vec![AccessSource::Cache, AccessSource::Default],
            watch_list: vec![EndpointRuleConfig::Endpoint {
                controller: "orders".to_string(),
                action: "list".to_string(),
                methods: vec!["GET".to_string()],
                is_allow: true,
                allow_guest: false,
            }],
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn test_authorize_via_watch_list() {
        let engine = AuthEngine::new(watch_list_config()).unwrap();

        let req = TestRequest::default()
            .uri("/orders/list?access_token=abc123")
            .param("controller", "Orders")
            .param("action", "List")
            .to_http_request();

        assert!(engine.authorize(&req).await.unwrap());
    }

    #[tokio::test]
    async fn test_unsupported_location_aborts_before_sources() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = calls.clone();
        let cache = Arc::new(HandlerSource::new(Box::new(move |_key, _req, _config| {
            probe.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(None) })
        })));

        let config = AuthConfig {
            credential_location: CredentialLocation::Path,
            ..watch_list_config()
        };
        let engine = AuthEngine::new(config).unwrap().with_cache_source(cache);

        let req = TestRequest::default()
            .param("controller", "Orders")
            .param("action", "List")
            .to_http_request();

        let err = engine.authorize(&req).await.unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedLocation { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_at_construction() {
        let config = AuthConfig {
            sources: Vec::new(),
            ..AuthConfig::default()
        };
        assert!(AuthEngine::new(config).is_err());
    }

    #[test]
    fn test_register_access_code_round_trip() {
        let engine = AuthEngine::new(AuthConfig::default()).unwrap();

        engine.register_access_code("abc123", true);
        assert_eq!(engine.registry().lookup("abc123"), Some(true));

        engine.register_access_code("abc123", false);
        assert_eq!(engine.registry().lookup("abc123"), Some(false));
    }

    #[test]
    fn test_engine_shares_seeded_registry() {
        let registry = AccessCodeRegistry::from_entries(vec![("seeded".to_string(), true)]);
        let engine = AuthEngine::with_registry(AuthConfig::default(), registry.clone()).unwrap();

        assert_eq!(engine.registry().lookup("seeded"), Some(true));

        engine.register_access_code("later", false);
        assert_eq!(registry.lookup("later"), Some(false));
    }
}
