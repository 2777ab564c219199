//! Comment operations over any [`CollectionStore`].
//!
//! Every write runs a read-mutate-commit loop: load the current snapshot,
//! apply the change to a copy, and commit against the snapshot's version
//! token. A conflicting commit means another writer landed first; the loop
//! re-reads and re-applies the change on the fresh collection, backing off
//! linearly between attempts. The mutation itself never touches shared
//! state, so replaying it is always safe.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use wayfare_core::comment::{self, Comment};

use crate::backend::{CollectionStore, CommitOutcome, InitOutcome};
use crate::error::StoreError;

/// Retry schedule for optimistic-concurrency conflicts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total commit attempts before giving up.
    pub max_attempts: u32,
    /// Multiplied by the attempt number to pace the next re-read.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            backoff_base: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Pause after attempt `attempt` (1-based) conflicted.
    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

/// High-level comment API shared by the HTTP handlers.
pub struct CommentService {
    store: Arc<dyn CollectionStore>,
    retry: RetryPolicy,
}

impl CommentService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self::with_policy(store, RetryPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn CollectionStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// All comments, newest first.
    pub async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        let mut comments = self.store.load_relaxed().await?;
        comment::sort_newest_first(&mut comments);
        Ok(comments)
    }

    /// Persist a new comment and hand it back.
    ///
    /// The comment's id and timestamp are fixed before the first attempt
    /// and survive any number of conflict retries unchanged.
    pub async fn append(&self, comment: Comment) -> Result<Comment, StoreError> {
        let message = format!("Add comment {}", comment.id);
        let inserted = comment.clone();
        self.commit_with_retry(&message, move |mut comments| {
            comments.insert(0, inserted.clone());
            Some(comments)
        })
        .await?;
        Ok(comment)
    }

    /// Delete a comment by id. `false` means no such comment existed, in
    /// which case nothing is written.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let message = format!("Delete comment {id}");
        let id = id.to_string();
        self.commit_with_retry(&message, move |mut comments| {
            let before = comments.len();
            comments.retain(|comment| comment.id != id);
            (comments.len() < before).then_some(comments)
        })
        .await
    }

    /// Create the backing collection when it does not exist yet.
    pub async fn init(&self) -> Result<InitOutcome, StoreError> {
        self.store.initialize().await
    }

    /// Run `mutate` against a fresh snapshot until a commit lands.
    ///
    /// `mutate` returning `None` means the change is a no-op on the current
    /// collection; the loop stops without writing and reports `false`.
    async fn commit_with_retry<F>(&self, message: &str, mut mutate: F) -> Result<bool, StoreError>
    where
        F: FnMut(Vec<Comment>) -> Option<Vec<Comment>>,
    {
        for attempt in 1..=self.retry.max_attempts {
            let snapshot = self.store.load().await?;
            let Some(next) = mutate(snapshot.comments) else {
                return Ok(false);
            };

            match self
                .store
                .commit(&next, snapshot.version.as_ref(), message)
                .await?
            {
                CommitOutcome::Committed => return Ok(true),
                CommitOutcome::Conflict => {
                    if attempt == self.retry.max_attempts {
                        break;
                    }
                    debug!(attempt, "commit conflicted, re-reading after backoff");
                    tokio::time::sleep(self.retry.delay_for(attempt)).await;
                }
            }
        }

        warn!(
            attempts = self.retry.max_attempts,
            "giving up on commit after repeated conflicts"
        );
        Err(StoreError::RetriesExhausted {
            attempts: self.retry.max_attempts,
        })
    }
}
