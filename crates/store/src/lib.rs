//! Comment collection persistence.
//!
//! The collection is a single JSON array of comments living either in a
//! local file ([`local::LocalJsonStore`]) or in a file of a GitHub
//! repository ([`github::GitHubStore`]). Both backends implement
//! [`CollectionStore`]; [`service::CommentService`] runs the
//! read-mutate-commit loop with optimistic-concurrency retries on top of
//! whichever backend is configured.

pub mod backend;
pub mod config;
pub mod error;
pub mod github;
pub mod local;
pub mod service;

pub use backend::{CollectionStore, CommitOutcome, InitOutcome, Snapshot, VersionToken};
pub use config::StoreConfig;
pub use error::StoreError;
pub use service::{CommentService, RetryPolicy};
