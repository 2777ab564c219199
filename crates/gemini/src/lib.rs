//! Client for the Gemini `generateContent` API, plus the normalizer that
//! turns its free-form replies into travel option lists.

pub mod client;
pub mod normalize;
pub mod prompt;

pub use client::{GeminiClient, GeminiConfig, GeminiCredential, GeminiError};
pub use normalize::extract_options;
pub use prompt::build_prompt;
