//! Backend contract shared by the local-file and GitHub comment stores.

use async_trait::async_trait;
use wayfare_core::comment::Comment;

use crate::error::StoreError;

/// Opaque version identifier supplied by a backend alongside the data it
/// read.
///
/// For the GitHub backend this is the blob SHA of the stored file; for the
/// local backend it is a process-local write-generation counter. It carries
/// no meaning beyond equality and must be handed back verbatim on the next
/// commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Point-in-time read of the comment collection.
///
/// Read fresh at the start of every mutating operation and discarded after
/// the commit attempt; never reused across attempts.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub comments: Vec<Comment>,
    /// `None` when the backing object does not exist yet.
    pub version: Option<VersionToken>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            comments: Vec::new(),
            version: None,
        }
    }
}

/// Result of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The store accepted the new collection.
    Committed,
    /// The stored bytes changed since the supplied version was read.
    /// Retryable by re-reading; every other failure is a [`StoreError`].
    Conflict,
}

/// Result of an [`CollectionStore::initialize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The backing object was absent and an empty collection was written.
    Created,
    /// The backing object already existed; nothing was written.
    AlreadyExists,
}

/// A place the comment collection can be read from and written to.
///
/// Implementations must treat an absent backing object as an empty
/// collection (lazy initialization), and must signal concurrent
/// modification via [`CommitOutcome::Conflict`] rather than an error so the
/// service layer can retry with a fresh read.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read the current collection together with its version token.
    async fn load(&self) -> Result<Snapshot, StoreError>;

    /// Attempt to replace the stored collection.
    ///
    /// `expected` is the version token observed by the `load` that produced
    /// this candidate (`None` when the object did not exist). `message`
    /// describes the change for backends that record one.
    async fn commit(
        &self,
        comments: &[Comment],
        expected: Option<&VersionToken>,
        message: &str,
    ) -> Result<CommitOutcome, StoreError>;

    /// Create the backing object with an empty collection if it is absent.
    /// Idempotent and safe to call repeatedly.
    async fn initialize(&self) -> Result<InitOutcome, StoreError>;

    /// Possibly-stale read used by list requests. Defaults to a fresh
    /// [`CollectionStore::load`]; backends with a warm cache may override.
    async fn load_relaxed(&self) -> Result<Vec<Comment>, StoreError> {
        Ok(self.load().await?.comments)
    }
}
