//! Comment store selection from the environment.

use std::sync::Arc;

use crate::backend::CollectionStore;
use crate::error::StoreError;
use crate::github::GitHubStore;
use crate::local::LocalJsonStore;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Which backend holds the comment collection.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// JSON file on the local filesystem.
    Local { path: String },
    /// JSON file in a GitHub repository, via the contents API.
    GitHub {
        api_url: String,
        repo: String,
        branch: String,
        file_path: String,
        token: Option<String>,
    },
}

impl StoreConfig {
    /// Read the backend selection from the environment.
    ///
    /// | Variable           | Default                  | Meaning                          |
    /// |--------------------|--------------------------|----------------------------------|
    /// | `COMMENTS_BACKEND` | `local`                  | `local` or `github`              |
    /// | `COMMENTS_PATH`    | `data/comments.json`     | Local file path                  |
    /// | `GITHUB_REPO`      | required for `github`    | `owner/name`                     |
    /// | `GITHUB_BRANCH`    | `main`                   | Branch holding the file          |
    /// | `GITHUB_FILE_PATH` | `comments.json`          | Path of the file inside the repo |
    /// | `GITHUB_TOKEN`     | unset                    | Write credential                 |
    /// | `GITHUB_API_URL`   | `https://api.github.com` | REST endpoint override           |
    pub fn from_env() -> Self {
        let backend = std::env::var("COMMENTS_BACKEND").unwrap_or_else(|_| "local".to_string());
        match backend.as_str() {
            "local" => Self::Local {
                path: std::env::var("COMMENTS_PATH")
                    .unwrap_or_else(|_| "data/comments.json".to_string()),
            },
            "github" => Self::GitHub {
                api_url: std::env::var("GITHUB_API_URL")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
                repo: std::env::var("GITHUB_REPO")
                    .expect("GITHUB_REPO must be set when COMMENTS_BACKEND=github"),
                branch: std::env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string()),
                file_path: std::env::var("GITHUB_FILE_PATH")
                    .unwrap_or_else(|_| "comments.json".to_string()),
                token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            },
            other => panic!("COMMENTS_BACKEND must be 'local' or 'github', got '{other}'"),
        }
    }

    /// Construct the selected backend.
    pub fn build(&self) -> Result<Arc<dyn CollectionStore>, StoreError> {
        match self {
            Self::Local { path } => Ok(Arc::new(LocalJsonStore::new(path))),
            Self::GitHub {
                api_url,
                repo,
                branch,
                file_path,
                token,
            } => Ok(Arc::new(GitHubStore::new(
                api_url.clone(),
                repo.clone(),
                branch.clone(),
                file_path.clone(),
                token.clone(),
            )?)),
        }
    }
}
