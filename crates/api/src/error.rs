use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wayfare_core::error::CoreError;
use wayfare_gemini::GeminiError;
use wayfare_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, store, and provider error types and implements
/// [`IntoResponse`] to produce consistent JSON error responses. Upstream
/// detail (provider payloads, store responses) is logged server-side and
/// never echoed to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wayfare_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A comment persistence error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An AI provider error.
    #[error("Provider error: {0}")]
    Gemini(#[from] GeminiError),

    /// Search was requested but no provider credential is configured.
    #[error("Travel search provider is not configured")]
    ProviderUnconfigured,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Persistence errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Provider errors ---
            AppError::Gemini(err) => classify_gemini_error(err),
            AppError::ProviderUnconfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PROVIDER_UNCONFIGURED",
                "Travel search is not configured on this server".to_string(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Exhausted conflict retries map to 409; the caller may retry the whole
///   operation.
/// - Unreachable, busy, or unwritable storage maps to 503.
/// - Malformed stored data maps to 500.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::RetriesExhausted { attempts } => {
            tracing::warn!(attempts, "Comment write lost every conflict retry");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Concurrent update conflict; please retry".to_string(),
            )
        }
        StoreError::Busy => (
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_UNAVAILABLE",
            "The comment store is busy".to_string(),
        ),
        StoreError::MissingWriteCredential => (
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_UNAVAILABLE",
            "The comment store is not writable".to_string(),
        ),
        StoreError::Corrupt(parse_err) => {
            tracing::error!(error = %parse_err, "Stored comment data is malformed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_CORRUPT",
                "The comment store is corrupted".to_string(),
            )
        }
        StoreError::Decode(decode_err) => {
            tracing::error!(error = %decode_err, "Stored comment data is not valid base64");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_CORRUPT",
                "The comment store is corrupted".to_string(),
            )
        }
        StoreError::Io(io_err) => {
            tracing::error!(error = %io_err, "Comment store I/O failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "The comment store is unavailable".to_string(),
            )
        }
        StoreError::Http(http_err) => {
            tracing::error!(error = %http_err, "Comment store request failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "The comment store is unavailable".to_string(),
            )
        }
        StoreError::Api { status, body } => {
            tracing::error!(status, body = %body, "Comment store rejected a request");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "The comment store is unavailable".to_string(),
            )
        }
    }
}

/// Classify a provider error into an HTTP status, error code, and message.
///
/// Every variant is a gateway failure (502): transport errors, provider
/// error responses, and replies the normalizer could not interpret. The
/// caller gets a generic message; detail stays in the server log.
fn classify_gemini_error(err: &GeminiError) -> (StatusCode, &'static str, String) {
    match err {
        GeminiError::Request(req_err) => {
            tracing::error!(error = %req_err, "Provider request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The travel search provider could not be reached".to_string(),
            )
        }
        GeminiError::Api { status, body } => {
            tracing::error!(status, body = %body, "Provider returned an error response");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The travel search provider returned an error".to_string(),
            )
        }
        GeminiError::Unrecognized => (
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_ERROR",
            "The travel search provider returned an unusable response".to_string(),
        ),
    }
}
