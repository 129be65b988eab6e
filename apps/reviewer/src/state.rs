use std::sync::Arc;

use crate::nlp::LanguagePipeline;
use crate::review::scoring::ScoringPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and shared read-only across requests.
    pub pipeline: Arc<dyn LanguagePipeline>,
    pub policy: ScoringPolicy,
}
