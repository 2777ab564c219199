#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the local comment file failed.
    #[error("Comment store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not a valid JSON comment collection.
    #[error("Stored comment collection is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The stored content could not be base64-decoded.
    #[error("Stored comment content is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The HTTP request to the remote store failed (network, DNS, TLS,
    /// timeout).
    #[error("Comment store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-2xx status that is not a
    /// version conflict.
    #[error("Comment store API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for server-side logs.
        body: String,
    },

    /// A write was requested but no write credential is configured.
    #[error("Comment store write credential is not configured")]
    MissingWriteCredential,

    /// The local write gate stayed contended past the bounded wait.
    #[error("Comment store is busy, try again")]
    Busy,

    /// A version conflict persisted through every retry attempt.
    #[error("Concurrent update conflict persisted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}
