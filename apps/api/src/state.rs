use std::sync::Arc;

use crate::config::Config;
use crate::source::DocumentSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Remote document fetcher for URL analysis. Default: HttpDocumentSource.
    pub source: Arc<dyn DocumentSource>,
}
