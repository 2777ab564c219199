//! Handler for the travel search proxy.
//!
//! One provider call per request, no retries at this layer. Raw provider
//! payloads never reach the caller; when the normalizer gives up they are
//! logged server-side and the caller sees a generic gateway error.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use wayfare_core::search::SearchRequest;
use wayfare_core::travel::{shape_options, TravelOption};
use wayfare_gemini::{build_prompt, extract_options, GeminiError};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Longest provider payload echoed into the server log.
const LOGGED_PAYLOAD_LIMIT: usize = 2048;

/// Response payload for the search endpoint.
#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<TravelOption>,
}

// ---------------------------------------------------------------------------
// POST /search
// ---------------------------------------------------------------------------

/// Proxy a travel search to the AI provider and normalize the reply.
pub async fn search_travel(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<impl IntoResponse> {
    request.check()?;

    let Some(gemini) = &state.gemini else {
        return Err(AppError::ProviderUnconfigured);
    };

    let prompt = build_prompt(&request);
    let document = gemini.generate(&prompt).await?;

    let raw_options = match extract_options(&document) {
        Ok(options) => options,
        Err(GeminiError::Unrecognized) => {
            let payload = document.to_string();
            tracing::error!(
                payload = %truncate_for_log(&payload, LOGGED_PAYLOAD_LIMIT),
                "Provider reply had no extractable option array"
            );
            return Err(AppError::Gemini(GeminiError::Unrecognized));
        }
        Err(other) => return Err(other.into()),
    };

    let mut results = shape_options(raw_options);
    results.truncate(request.effective_max_results());

    tracing::info!(count = results.len(), "Travel search completed");

    Ok(Json(SearchResponse { results }))
}

/// Clip a log payload to `max` bytes without splitting a character.
fn truncate_for_log(payload: &str, max: usize) -> &str {
    if payload.len() <= max {
        return payload;
    }
    let mut end = max;
    while !payload.is_char_boundary(end) {
        end -= 1;
    }
    &payload[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdef", 3), "abc");

        // Multibyte char straddling the cut is dropped whole.
        let s = "ab\u{00e9}cd";
        assert_eq!(truncate_for_log(s, 3), "ab");
    }
}
