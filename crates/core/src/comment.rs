//! Comment record, creation DTO, and field validation.
//!
//! Validation runs on the raw (trimmed) input before any store interaction;
//! sanitization happens once, at construction time, so stored records are
//! always markup-neutralized.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::sanitize::neutralize_markup;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length of the display name (characters, counted after trimming).
pub const MAX_NAME_LENGTH: usize = 100;
/// Maximum length of the comment body (characters, counted after trimming).
pub const MAX_TEXT_LENGTH: usize = 1000;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A stored comment.
///
/// `id` is a server-assigned UUIDv7: the timestamp prefix keeps ids roughly
/// creation-ordered while the random tail keeps them unique even when two
/// comments are created in the same millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub text: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new comment.
///
/// Older clients post the body under `message` or `body`; both are accepted
/// as aliases of `text`.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub name: String,
    #[serde(alias = "message", alias = "body")]
    pub text: String,
}

impl Comment {
    /// Build a new comment from raw user input.
    ///
    /// Validates both fields against the length bounds, then trims and
    /// escapes them, and assigns the server-side id and timestamp.
    pub fn new(name: &str, text: &str) -> Result<Self, CoreError> {
        validate_name(name)?;
        validate_text(text)?;

        Ok(Self {
            id: Uuid::now_v7().to_string(),
            name: neutralize_markup(name),
            text: neutralize_markup(text),
            created_at: chrono::Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the display name: required, non-empty after trimming, at most
/// [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name exceeds maximum length of {MAX_NAME_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate the comment body: required, non-empty after trimming, at most
/// [`MAX_TEXT_LENGTH`] characters.
pub fn validate_text(text: &str) -> Result<(), CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("text must not be empty".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "text exceeds maximum length of {MAX_TEXT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Sort comments newest-first by `created_at`.
///
/// The sort is stable, so comments sharing a timestamp keep their storage
/// order.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
