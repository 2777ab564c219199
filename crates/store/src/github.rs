//! GitHub-hosted comment store.
//!
//! The collection is a JSON file inside a repository, read and written
//! through the contents API. Every read returns the blob SHA alongside the
//! decoded collection; the SHA is this backend's version token, and a
//! commit that presents a stale SHA is answered by GitHub with HTTP 409,
//! which surfaces as [`CommitOutcome::Conflict`]. Reads of public
//! repositories work without a credential; writes require a token.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use wayfare_core::comment::Comment;

use crate::backend::{CollectionStore, CommitOutcome, InitOutcome, Snapshot, VersionToken};
use crate::error::StoreError;

/// Timeout for contents API calls.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("wayfare/", env!("CARGO_PKG_VERSION"));

/// Comment store backed by a file in a GitHub repository.
pub struct GitHubStore {
    client: reqwest::Client,
    api_url: String,
    repo: String,
    branch: String,
    file_path: String,
    token: Option<String>,
}

/// `GET /repos/{repo}/contents/{path}` response body (file variant).
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    /// Base64 of the stored bytes, interspersed with newlines.
    content: String,
    /// Blob SHA of the stored bytes.
    sha: String,
}

impl GitHubStore {
    /// Create a store for `repo` (`owner/name`) at `file_path` on `branch`.
    ///
    /// `token` is the write credential; reads of public repositories may
    /// omit it.
    pub fn new(
        api_url: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        file_path: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            repo: repo.into(),
            branch: branch.into(),
            file_path: file_path.into(),
            token,
        })
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_url, self.repo, self.file_path
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Fetch the stored file, or `None` when it does not exist yet.
    async fn fetch_remote(&self) -> Result<Option<(Vec<Comment>, VersionToken)>, StoreError> {
        let response = self
            .request(self.client.get(self.contents_url()))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let contents: ContentsResponse = response.json().await?;
        let comments = decode_collection(&contents.content)?;
        Ok(Some((comments, VersionToken::new(contents.sha))))
    }
}

#[async_trait]
impl CollectionStore for GitHubStore {
    async fn load(&self) -> Result<Snapshot, StoreError> {
        match self.fetch_remote().await? {
            Some((comments, version)) => Ok(Snapshot {
                comments,
                version: Some(version),
            }),
            None => Ok(Snapshot::empty()),
        }
    }

    async fn commit(
        &self,
        comments: &[Comment],
        expected: Option<&VersionToken>,
        message: &str,
    ) -> Result<CommitOutcome, StoreError> {
        if self.token.is_none() {
            return Err(StoreError::MissingWriteCredential);
        }

        let mut body = serde_json::json!({
            "message": message,
            "content": encode_collection(comments)?,
            "branch": self.branch,
        });
        if let Some(token) = expected {
            body["sha"] = serde_json::Value::String(token.as_str().to_string());
        }

        let response = self
            .request(self.client.put(self.contents_url()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Ok(CommitOutcome::Conflict);
        }
        // GitHub reports a sha-less create of a file that already exists
        // as 422, not 409. Expected-absent versus found-present is still a
        // version race, so it takes the same retry path.
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY && expected.is_none() {
            return Ok(CommitOutcome::Conflict);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(CommitOutcome::Committed)
    }

    async fn initialize(&self) -> Result<InitOutcome, StoreError> {
        if self.fetch_remote().await?.is_some() {
            return Ok(InitOutcome::AlreadyExists);
        }

        match self.commit(&[], None, "Initialize comment store").await? {
            CommitOutcome::Committed => Ok(InitOutcome::Created),
            // Someone else created the file between our check and the
            // write; that still satisfies "exists".
            CommitOutcome::Conflict => Ok(InitOutcome::AlreadyExists),
        }
    }
}

// ---------------------------------------------------------------------------
// Content codec
// ---------------------------------------------------------------------------

/// Decode a contents-API `content` field (newline-interspersed base64)
/// into the comment collection.
fn decode_collection(content: &str) -> Result<Vec<Comment>, StoreError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Encode the collection the way it is stored: pretty-printed JSON with a
/// trailing newline, then base64.
fn encode_collection(comments: &[Comment]) -> Result<String, StoreError> {
    let mut bytes = serde_json::to_vec_pretty(comments)?;
    bytes.push(b'\n');
    Ok(STANDARD.encode(bytes))
}
