//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Default REST endpoint.
const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model when `GEMINI_MODEL` is unset.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Default request timeout in seconds. Generation is slow; this must be
/// comfortably above typical completion latency.
const DEFAULT_TIMEOUT_SECS: u64 = 25;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Request to Gemini failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Gemini response contains no recognizable travel options")]
    Unrecognized,
}

/// How requests authenticate against the API.
#[derive(Debug, Clone)]
pub enum GeminiCredential {
    /// Sent as the `x-goog-api-key` header.
    ApiKey(String),
    /// Sent as an `Authorization: Bearer` header (OAuth access token).
    Bearer(String),
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_url: String,
    pub model: String,
    pub credential: GeminiCredential,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Read the client configuration from the environment.
    ///
    /// Returns `None` when neither `GEMINI_API_KEY` nor
    /// `GEMINI_ACCESS_TOKEN` is set; the search surface is then disabled
    /// instead of failing at startup. `GEMINI_API_KEY` wins when both are
    /// present.
    ///
    /// | Variable              | Default                                            |
    /// |-----------------------|----------------------------------------------------|
    /// | `GEMINI_API_KEY`      | unset                                              |
    /// | `GEMINI_ACCESS_TOKEN` | unset                                              |
    /// | `GEMINI_API_URL`      | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_MODEL`        | `gemini-2.0-flash`                                 |
    /// | `GEMINI_TIMEOUT_SECS` | `25`                                               |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.is_empty());
        let access_token = std::env::var("GEMINI_ACCESS_TOKEN")
            .ok()
            .filter(|v| !v.is_empty());

        let credential = match (api_key, access_token) {
            (Some(key), _) => GeminiCredential::ApiKey(key),
            (None, Some(token)) => GeminiCredential::Bearer(token),
            (None, None) => return None,
        };

        Some(Self {
            api_url: std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            credential,
            timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .expect("GEMINI_TIMEOUT_SECS must be a number of seconds"),
        })
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Send a single-turn prompt and return the raw response document.
    ///
    /// No interpretation happens here; the caller feeds the document to
    /// the normalizer.
    pub async fn generate(&self, prompt: &str) -> Result<serde_json::Value, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_url, self.config.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = %self.config.model, "sending generateContent request");

        let request = self.client.post(&url).json(&body);
        let request = match &self.config.credential {
            GeminiCredential::ApiKey(key) => request.header("x-goog-api-key", key),
            GeminiCredential::Bearer(token) => request.bearer_auth(token),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
