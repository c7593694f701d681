use std::fmt;

use async_trait::async_trait;

/// Errors a storage backend can report. None of these reach the user:
/// reads degrade to "absent" and writes are dropped with a log line.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying file or device failure.
    Io(std::io::Error),
    /// Stored data could not be decoded.
    Parse(String),
    /// Backend cannot serve requests right now.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Parse(msg) => write!(f, "store parse error: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// String key → string value storage that survives restarts.
///
/// Last write wins; there is no versioning. An empty store (cold start)
/// answers `Ok(None)`.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the name of the backend, for logs.
    fn name(&self) -> &str;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
