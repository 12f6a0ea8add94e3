//! Ordered evaluation of authorization sources
//!
//! Sources are consulted strictly in the configured order, one request at a
//! time. The first source that produces a verdict ends the chain; a deny is
//! as final as an allow, and only a deferral moves evaluation to the next
//! source. Each consultation is timed for diagnostics.

use std::sync::Arc;
use std::time::Instant;

use actix_web::HttpRequest;
use tracing::{debug, warn};

use crate::auth::sources::EndpointSource;
use crate::config::{AccessSource, AuthConfig};
use crate::endpoint::{EndpointMatcher, EndpointRule, RouteIdentity};
use crate::error::Result;

/// Outcome of consulting one source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source holds no rules for this route; the next source decides
    Deferred,
    /// Definitive verdict; evaluation stops even when the verdict is a deny
    Verdict(bool),
}

/// Drives the configured source chain for one request
pub struct SourceEvaluator {
    config: Arc<AuthConfig>,
    matcher: EndpointMatcher,
    /// Compiled watch-list backing the terminal `Default` source
    watch_list: Vec<EndpointRule>,
    cache_source: Option<Arc<dyn EndpointSource>>,
    database_source: Option<Arc<dyn EndpointSource>>,
}

impl SourceEvaluator {
    /// Create an evaluator over validated configuration
    pub fn new(config: Arc<AuthConfig>) -> Result<Self> {
        let watch_list = config.compile_watch_list()?;
        let matcher = EndpointMatcher::new(
            config.controller_suffix.clone(),
            config.wildcard_action.clone(),
        );
        Ok(Self {
            config,
            matcher,
            watch_list,
            cache_source: None,
            database_source: None,
        })
    }

    /// Bind the cache extraction handler
    pub fn with_cache_source(mut self, source: Arc<dyn EndpointSource>) -> Self {
        self.cache_source = Some(source);
        self
    }

    /// Bind the database extraction handler
    pub fn with_database_source(mut self, source: Arc<dyn EndpointSource>) -> Self {
        self.database_source = Some(source);
        self
    }

    /// The matcher used for every source's rule list
    pub fn matcher(&self) -> &EndpointMatcher {
        &self.matcher
    }

    /// Evaluate the configured chain for one request
    ///
    /// Handler errors propagate unchanged; the pipeline decides whether to
    /// fail open or closed (closed is the documented default).
    pub async fn evaluate(&self, req: &HttpRequest, credential_key: &str) -> Result<bool> {
        let identity = RouteIdentity::from_request(req);

        for source in &self.config.sources {
            let started = Instant::now();

            let outcome = match source {
                // Reserved extension point: no auth-center contract exists
                // yet, so this source always defers.
                AccessSource::AuthCenter => SourceOutcome::Deferred,
                AccessSource::Cache => {
                    self.consult(self.cache_source.as_deref(), credential_key, req, &identity)
                        .await?
                }
                AccessSource::Database => {
                    self.consult(
                        self.database_source.as_deref(),
                        credential_key,
                        req,
                        &identity,
                    )
                    .await?
                }
                // Terminal fallback: the watch-list always yields a verdict
                AccessSource::Default => {
                    SourceOutcome::Verdict(self.matcher.matches(&identity, &self.watch_list))
                }
            };

            debug!(
                source = ?source,
                outcome = ?outcome,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "authorization source evaluated"
            );

            if let SourceOutcome::Verdict(allowed) = outcome {
                return Ok(allowed);
            }
        }

        // Reachable only when the chain has no terminal Default source; a
        // configuration concern, resolved as deny.
        warn!(
            path = %req.path(),
            "authorization chain exhausted without a verdict, denying"
        );
        Ok(false)
    }

    async fn consult(
        &self,
        source: Option<&dyn EndpointSource>,
        credential_key: &str,
        req: &HttpRequest,
        identity: &RouteIdentity,
    ) -> Result<SourceOutcome> {
        let Some(source) = source else {
            return Ok(SourceOutcome::Deferred);
        };

        match source.load_endpoints(credential_key, req, &self.config).await? {
            None => Ok(SourceOutcome::Deferred),
            Some(rules) => Ok(SourceOutcome::Verdict(
                self.matcher.matches(identity, &rules),
            )),
        }
    }
}
