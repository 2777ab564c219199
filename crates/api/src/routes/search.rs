use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Mount the travel search route.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(handlers::search::search_travel))
}
