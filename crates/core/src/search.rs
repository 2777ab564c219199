//! Search request contract for the travel-search proxy.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length of the free-text query (characters). Matches the
/// `length` bound on [`SearchRequest::query`].
pub const MAX_QUERY_LENGTH: u64 = 500;
/// Result count used when the caller does not specify one.
pub const DEFAULT_MAX_RESULTS: u8 = 5;

// ---------------------------------------------------------------------------
// Request DTO
// ---------------------------------------------------------------------------

/// Body of `POST /search`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    /// Free-text description of the trip the caller is after.
    #[validate(length(min = 1, max = 500))]
    pub query: String,

    /// Optional spending bracket, folded into the prompt.
    pub budget: Option<BudgetTier>,

    /// Cap on the number of returned options (1..=20, default 5).
    #[validate(range(min = 1, max = 20))]
    pub max_results: Option<u8>,
}

impl SearchRequest {
    /// Validate the request, rejecting blank queries and out-of-range
    /// parameters with a field-level message.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.query.trim().is_empty() {
            return Err(CoreError::Validation("query must not be empty".into()));
        }
        self.validate()
            .map_err(|e| CoreError::Validation(format_validation_errors(&e)))
    }

    /// The effective result cap for this request.
    pub fn effective_max_results(&self) -> usize {
        usize::from(self.max_results.unwrap_or(DEFAULT_MAX_RESULTS))
    }
}

/// Flatten [`validator::ValidationErrors`] into a single deterministic
/// field-level message, e.g. `"query: length"`.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let detail = errs
                .first()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .unwrap_or_else(|| "invalid".to_string());
            format!("{field}: {detail}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

// ---------------------------------------------------------------------------
// Budget tiers
// ---------------------------------------------------------------------------

/// Spending bracket hint passed through to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Midrange,
    Luxury,
}

impl BudgetTier {
    /// Phrase describing this tier in the generated prompt.
    pub fn prompt_phrase(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "a tight budget",
            BudgetTier::Midrange => "a mid-range budget",
            BudgetTier::Luxury => "a generous luxury budget",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
