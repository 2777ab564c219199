//! Handlers for the comment board.
//!
//! Comments are validated and sanitized before any store interaction;
//! persistence goes through [`CommentService`](wayfare_store::CommentService),
//! which retries version conflicts internally.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use wayfare_core::comment::{Comment, CreateComment};
use wayfare_core::error::CoreError;
use wayfare_store::{InitOutcome, StoreError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /comments
// ---------------------------------------------------------------------------

/// List all comments, newest first.
pub async fn list_comments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let comments = state.comments.list().await?;
    Ok(Json(comments))
}

// ---------------------------------------------------------------------------
// POST /comments
// ---------------------------------------------------------------------------

/// Submit a new comment.
///
/// Validation failures reject the request before the store is touched.
pub async fn create_comment(
    State(state): State<AppState>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let comment = Comment::new(&input.name, &input.text)?;
    let stored = state.comments.append(comment).await?;

    tracing::info!(comment_id = %stored.id, "Comment created");

    Ok((StatusCode::CREATED, Json(stored)))
}

// ---------------------------------------------------------------------------
// DELETE /comments/{id}
// ---------------------------------------------------------------------------

/// Delete a comment by id.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let removed = state.comments.remove(&id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }

    tracing::info!(comment_id = %id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /comments/init
// ---------------------------------------------------------------------------

/// Response payload for the init endpoint.
#[derive(Serialize)]
pub struct InitResponse {
    /// Whether this call created the collection.
    pub created: bool,
    /// Why nothing was created, or `"created"`.
    pub reason: &'static str,
}

/// Create the backing comment collection when it does not exist yet.
///
/// Idempotent first-run setup: an existing collection and a read-only
/// deployment (no write credential) both report their state instead of
/// erroring.
pub async fn init_comments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let response = match state.comments.init().await {
        Ok(InitOutcome::Created) => {
            tracing::info!("Comment collection created");
            InitResponse {
                created: true,
                reason: "created",
            }
        }
        Ok(InitOutcome::AlreadyExists) => InitResponse {
            created: false,
            reason: "already exists",
        },
        Err(StoreError::MissingWriteCredential) => InitResponse {
            created: false,
            reason: "no write credential configured",
        },
        Err(err) => return Err(err.into()),
    };

    Ok(Json(response))
}
