use axum::routing::{delete, get};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Mount the comment board routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route("/comments/init", get(handlers::comments::init_comments))
        .route("/comments/{id}", delete(handlers::comments::delete_comment))
}
