//! Endpoint source handlers
//!
//! A source hands the engine the permission rules it holds for a credential
//! key, or `None` when the route is outside its scope. Sources are bound to
//! the engine explicitly at construction; there is no ambient registration.

use actix_web::HttpRequest;
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;

use crate::config::AuthConfig;
use crate::endpoint::EndpointRule;
use crate::error::Result;

/// Capability interface for loading permission rules from a backing store
///
/// `Ok(None)` means the source has no opinion on this key/route and defers to
/// the next source in the chain. Errors are not absorbed here: they surface
/// to the pipeline, which should treat a failed extraction as a denial
/// (fail closed).
///
/// Futures are not required to be `Send` because `HttpRequest` is pinned to
/// its worker thread; the handler object itself is shared across workers.
#[async_trait(?Send)]
pub trait EndpointSource: Send + Sync {
    /// Load the permission rules this source holds for `credential_key`
    async fn load_endpoints(
        &self,
        credential_key: &str,
        req: &HttpRequest,
        config: &AuthConfig,
    ) -> Result<Option<Vec<EndpointRule>>>;
}

/// Handler signature for function-backed sources
pub type ExtractHandler = Box<
    dyn for<'a> Fn(
            &'a str,
            &'a HttpRequest,
            &'a AuthConfig,
        ) -> LocalBoxFuture<'a, Result<Option<Vec<EndpointRule>>>>
        + Send
        + Sync,
>;

/// Adapter binding a plain async handler function to [`EndpointSource`]
pub struct HandlerSource {
    handler: ExtractHandler,
}

impl HandlerSource {
    /// Wrap an extraction handler
    pub fn new(handler: ExtractHandler) -> Self {
        Self { handler }
    }
}

#[async_trait(?Send)]
impl EndpointSource for HandlerSource {
    async fn load_endpoints(
        &self,
        credential_key: &str,
        req: &HttpRequest,
        config: &AuthConfig,
    ) -> Result<Option<Vec<EndpointRule>>> {
        (self.handler)(credential_key, req, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointEntry;
    use actix_web::test::TestRequest;

    #[tokio::test]
    async fn test_handler_source_adapts_functions() {
        let source = HandlerSource::new(Box::new(|credential_key, _req, _config| {
            let known = credential_key == "abc123";
            Box::pin(async move {
                if known {
                    Ok(Some(vec![EndpointRule::Endpoint(EndpointEntry::allow(
                        "orders",
                        "list",
                        vec!["GET".to_string()],
                    ))]))
                } else {
                    Ok(None)
                }
            })
        }));

        let req = TestRequest::default().to_http_request();
        let config = AuthConfig::default();

        let rules = source
            .load_endpoints("abc123", &req, &config)
            .await
            .unwrap();
        assert_eq!(rules.map(|r| r.len()), Some(1));

        let deferred = source
            .load_endpoints("unknown", &req, &config)
            .await
            .unwrap();
        assert!(deferred.is_none());
    }
}
