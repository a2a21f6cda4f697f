use std::sync::Arc;

use crate::config::Config;
use crate::extract::DocumentExtractor;
use crate::llm_client::registry::ProviderRegistry;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is immutable after startup: requests share
/// no mutable state and need no locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Document-to-text collaborator. A trait object so handler tests can
    /// stub it out.
    pub extractor: Arc<dyn DocumentExtractor>,
    /// Hosted-model backends, keyed by provider identifier.
    pub providers: Arc<ProviderRegistry>,
}
