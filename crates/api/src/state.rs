use std::sync::Arc;

use wayfare_gemini::GeminiClient;
use wayfare_store::CommentService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Comment persistence with conflict retries, over the configured backend.
    pub comments: Arc<CommentService>,
    /// AI provider client; `None` when no credential is configured, which
    /// disables the search endpoint.
    pub gemini: Option<Arc<GeminiClient>>,
}
