//! Route tree (flat, no version prefix):
//!
//! ```text
//! /health              liveness probe (GET)
//!
//! /search              travel search proxy (POST)
//!
//! /comments            list, create (GET, POST)
//! /comments/init       create the backing collection (GET)
//! /comments/{id}       delete (DELETE)
//! ```

pub mod comments;
pub mod health;
pub mod search;
