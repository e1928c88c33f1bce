//! Remote store abstraction trait
//!
//! This module defines the `RemoteStore` trait that every backend implements.

use async_trait::async_trait;
use thiserror::Error;
use vidrepo_core::{RemoteFile, StoreBackend, VideoError, WriteRequest};

/// Remote store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("Remote API returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for VideoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(msg) => VideoError::Transport(msg),
            StoreError::Remote { status, body } => VideoError::Remote { status, body },
            StoreError::Decode(msg) => VideoError::Decode(msg),
            StoreError::InvalidName(msg) => {
                VideoError::Validation(format!("Invalid file name: {}", msg))
            }
            StoreError::ConfigError(msg) => VideoError::Config(msg),
        }
    }
}

/// Remote store abstraction trait
///
/// Both operations issue exactly one request and keep no state between calls; retrying
/// is the caller's decision.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Create or overwrite `{base_path}/{relative_name}` with the request's content.
    async fn put_file(&self, relative_name: &str, request: &WriteRequest) -> StoreResult<()>;

    /// List the files directly under the base path.
    ///
    /// Only file entries that carry a download URL are returned. An empty or not yet
    /// created directory yields an empty list.
    async fn list_directory(&self) -> StoreResult<Vec<RemoteFile>>;

    /// Get the store backend type
    fn backend_type(&self) -> StoreBackend;
}
