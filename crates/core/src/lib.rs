//! Domain types for the Wayfare backend.
//!
//! Everything that describes *what* the service stores and returns lives
//! here: the comment record with its validation and sanitization rules, the
//! search request contract, and the travel-option output shape. Transport
//! and persistence concerns live in the `wayfare-store`, `wayfare-gemini`,
//! and `wayfare-api` crates.

pub mod comment;
pub mod error;
pub mod sanitize;
pub mod search;
pub mod travel;
pub mod types;
