//! Local-file comment store.
//!
//! The collection lives in one pretty-printed JSON file. Writers serialize
//! through a process-local gate acquired by bounded cooperative polling, so
//! at most one file write is in flight at a time; the version token is a
//! write-generation counter, which lets the service layer run the same
//! read-mutate-commit loop it uses against the remote backend. List
//! requests may be served from a warm in-process cache; the write path
//! always re-reads the file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex as StdMutex, MutexGuard as StdMutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};
use wayfare_core::comment::Comment;

use crate::backend::{CollectionStore, CommitOutcome, InitOutcome, Snapshot, VersionToken};
use crate::error::StoreError;

/// Interval between write-gate acquisition polls.
const WRITE_POLL_INTERVAL: Duration = Duration::from_millis(30);
/// Polls before giving up on the write gate with [`StoreError::Busy`].
const WRITE_POLL_LIMIT: u32 = 100;

/// Comment store backed by a single local JSON file.
pub struct LocalJsonStore {
    path: PathBuf,
    /// Write gate: held for the duration of every file write.
    gate: Mutex<()>,
    /// Write generation, exposed as this backend's version token.
    generation: AtomicU64,
    /// Warm copy of the collection for relaxed (list) reads. Written only
    /// on the write path and on first population.
    cache: StdMutex<Option<Vec<Comment>>>,
}

impl LocalJsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: Mutex::new(()),
            generation: AtomicU64::new(0),
            cache: StdMutex::new(None),
        }
    }

    /// Acquire the write gate, polling every [`WRITE_POLL_INTERVAL`] up to
    /// [`WRITE_POLL_LIMIT`] times before reporting the store busy.
    async fn acquire_gate(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        for _ in 0..WRITE_POLL_LIMIT {
            if let Ok(guard) = self.gate.try_lock() {
                return Ok(guard);
            }
            tokio::time::sleep(WRITE_POLL_INTERVAL).await;
        }
        Err(StoreError::Busy)
    }

    fn current_version(&self) -> VersionToken {
        VersionToken::new(self.generation.load(Ordering::SeqCst).to_string())
    }

    /// Read and parse the comment file. An absent file is an empty
    /// collection; malformed content is a corrupt-store error.
    async fn read_file(&self) -> Result<Vec<Comment>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the collection via a temp file and rename, creating parent
    /// directories as needed. Caller must hold the write gate.
    async fn write_file(&self, comments: &[Comment]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut bytes = serde_json::to_vec_pretty(comments)?;
        bytes.push(b'\n');

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Lock the relaxed-read cache. The cached `Vec` is only ever replaced
    /// wholesale, never edited in place, so a lock poisoned by a panicking
    /// task still guards coherent data and is safe to recover.
    fn cache_guard(&self) -> StdMutexGuard<'_, Option<Vec<Comment>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh_cache(&self, comments: &[Comment]) {
        let mut cache = self.cache_guard();
        *cache = Some(comments.to_vec());
    }
}

#[async_trait]
impl CollectionStore for LocalJsonStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        let comments = self.read_file().await?;
        Ok(Snapshot {
            comments,
            version: Some(self.current_version()),
        })
    }

    async fn commit(
        &self,
        comments: &[Comment],
        expected: Option<&VersionToken>,
        _message: &str,
    ) -> Result<CommitOutcome, StoreError> {
        let _gate = self.acquire_gate().await?;

        // A writer that slipped in between our load and this commit bumped
        // the generation; the caller must re-read and recompute.
        let current = self.current_version();
        let expected_matches = match expected {
            Some(token) => *token == current,
            None => current.as_str() == "0",
        };
        if !expected_matches {
            return Ok(CommitOutcome::Conflict);
        }

        self.write_file(comments).await?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.refresh_cache(comments);
        Ok(CommitOutcome::Committed)
    }

    async fn initialize(&self) -> Result<InitOutcome, StoreError> {
        let _gate = self.acquire_gate().await?;

        if tokio::fs::try_exists(&self.path).await? {
            return Ok(InitOutcome::AlreadyExists);
        }

        self.write_file(&[]).await?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.refresh_cache(&[]);
        Ok(InitOutcome::Created)
    }

    async fn load_relaxed(&self) -> Result<Vec<Comment>, StoreError> {
        {
            let cache = self.cache_guard();
            if let Some(comments) = cache.as_ref() {
                return Ok(comments.clone());
            }
        }

        // Cold cache: do one real read and keep it warm.
        let comments = self.read_file().await?;
        self.refresh_cache(&comments);
        Ok(comments)
    }
}
