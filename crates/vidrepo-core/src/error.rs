//! Error types module
//!
//! All failures of the upload and listing flows are unified under `VideoError`. Each
//! variant self-describes a machine-readable kind and code so callers can branch on
//! structure while still showing the display message verbatim.

use std::io;

use serde::{Deserialize, Serialize};

use crate::constants::BYTES_PER_MB;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a busy operation
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Structured error category attached to every failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Encoding,
    Source,
    Transport,
    Remote,
    Decode,
    Config,
    Busy,
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    /// Input rejected before any network call (oversized video).
    #[error("{0}")]
    Validation(String),

    /// Memory could not be reserved while buffering or encoding.
    #[error("{0}")]
    Encoding(String),

    #[error("Failed to read video source: {0}")]
    Source(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Remote API error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("Invalid response from remote API: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Another call of the same operation is still in flight.
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// The caller dropped the call before it finished.
    #[error("{0} cancelled")]
    Cancelled(&'static str),
}

/// Result type for upload and listing operations
pub type VideoResult<T> = Result<T, VideoError>;

impl VideoError {
    /// Oversized input. `size_bytes` is reported in whole megabytes, rounded down.
    pub fn too_large(size_bytes: u64, max_bytes: usize) -> Self {
        let size_mb = size_bytes / BYTES_PER_MB as u64;
        let max_mb = max_bytes / BYTES_PER_MB;
        VideoError::Validation(format!(
            "File too large ({} MB). Please use a smaller video (max {}MB)",
            size_mb, max_mb
        ))
    }

    /// Allocation for the buffered or encoded payload failed.
    pub fn out_of_memory() -> Self {
        VideoError::Encoding("File too large to process. Please use a smaller video.".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        error_static_metadata(self).0
    }

    /// Machine-readable error code (e.g., "REMOTE_ERROR")
    pub fn error_code(&self) -> &'static str {
        error_static_metadata(self).1
    }

    /// Whether repeating the same call may succeed.
    pub fn is_recoverable(&self) -> bool {
        error_static_metadata(self).2
    }

    pub fn log_level(&self) -> LogLevel {
        error_static_metadata(self).3
    }
}

impl From<io::Error> for VideoError {
    fn from(err: io::Error) -> Self {
        VideoError::Source(err.to_string())
    }
}

impl From<serde_json::Error> for VideoError {
    fn from(err: serde_json::Error) -> Self {
        VideoError::Decode(err.to_string())
    }
}

/// Static metadata for each variant: (kind, error_code, recoverable, log_level).
fn error_static_metadata(err: &VideoError) -> (ErrorKind, &'static str, bool, LogLevel) {
    match err {
        VideoError::Validation(_) => (
            ErrorKind::Validation,
            "VALIDATION_ERROR",
            false,
            LogLevel::Debug,
        ),
        VideoError::Encoding(_) => (
            ErrorKind::Encoding,
            "ENCODING_ERROR",
            false,
            LogLevel::Warn,
        ),
        VideoError::Source(_) => (ErrorKind::Source, "SOURCE_ERROR", false, LogLevel::Warn),
        VideoError::Transport(_) => (
            ErrorKind::Transport,
            "TRANSPORT_ERROR",
            true,
            LogLevel::Error,
        ),
        VideoError::Remote { status, .. } => (
            ErrorKind::Remote,
            "REMOTE_ERROR",
            *status >= 500 || *status == 429,
            LogLevel::Error,
        ),
        VideoError::Decode(_) => (ErrorKind::Decode, "DECODE_ERROR", false, LogLevel::Error),
        VideoError::Config(_) => (ErrorKind::Config, "CONFIG_ERROR", false, LogLevel::Error),
        VideoError::Busy(_) => (ErrorKind::Busy, "BUSY", true, LogLevel::Warn),
        VideoError::Cancelled(_) => (ErrorKind::Cancelled, "CANCELLED", true, LogLevel::Warn),
    }
}
