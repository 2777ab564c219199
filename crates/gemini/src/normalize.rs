//! Normalization of model replies into a list of option objects.
//!
//! Replies arrive in several shapes depending on what sits in front of
//! the model: a bare array, an object wrapping the array under a named
//! field, or the full `generateContent` envelope whose text parts embed
//! the array in prose or code fences. Strategies are tried strictest
//! first; the first one that yields an array wins. Elements are returned
//! as raw JSON values, missing fields and all; shaping into travel
//! options happens downstream.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::client::GeminiError;

/// Object fields probed when the reply wraps the array instead of being one.
const WRAPPER_FIELDS: &[&str] = &["results", "predictions", "suggestions"];
/// Top-level fields that may hold the generated text outside the
/// `generateContent` envelope, in preference order.
const TEXT_FIELDS: &[&str] = &["text", "output", "content"];

/// Minimal `generateContent` envelope; everything else is ignored.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract the option array from a model reply.
///
/// An empty array is a valid outcome (the model suggested nothing);
/// [`GeminiError::Unrecognized`] means no strategy found an array at all.
pub fn extract_options(document: &Value) -> Result<Vec<Value>, GeminiError> {
    if let Some(options) = document.as_array() {
        return Ok(options.clone());
    }

    if let Some(options) = from_wrapper_field(document) {
        debug!("reply wrapped the option array in a named field");
        return Ok(options);
    }

    let text = harvest_text(document);
    if !text.trim().is_empty() {
        if let Some(options) = from_embedded_text(&text) {
            debug!("recovered option array from reply text");
            return Ok(options);
        }
    }

    Err(GeminiError::Unrecognized)
}

/// Probe an object for a conventionally named array field.
fn from_wrapper_field(value: &Value) -> Option<Vec<Value>> {
    let object = value.as_object()?;
    WRAPPER_FIELDS
        .iter()
        .find_map(|field| object.get(*field)?.as_array().cloned())
}

/// Concatenate every text the reply might carry, candidate parts first,
/// then conventional top-level text fields.
fn harvest_text(value: &Value) -> String {
    let mut texts: Vec<String> = Vec::new();

    if let Ok(envelope) = GenerateResponse::deserialize(value) {
        for candidate in envelope.candidates {
            let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
            texts.extend(parts.into_iter().filter_map(|part| part.text));
        }
    }

    if let Some(object) = value.as_object() {
        for field in TEXT_FIELDS {
            if let Some(text) = object.get(*field).and_then(Value::as_str) {
                texts.push(text.to_string());
            }
        }
    }

    texts.join("\n")
}

/// Parse an option array out of free text: the whole text first, then the
/// widest bracket-delimited substring (first `[` through last `]`), which
/// also strips code fences and surrounding prose.
fn from_embedded_text(text: &str) -> Option<Vec<Value>> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(options) = value.as_array() {
            return Some(options.clone());
        }
        if let Some(options) = from_wrapper_field(&value) {
            return Some(options);
        }
    }

    let start = trimmed.find('[')?;
    let end = trimmed.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Value>(&trimmed[start..=end])
        .ok()?
        .as_array()
        .cloned()
}
