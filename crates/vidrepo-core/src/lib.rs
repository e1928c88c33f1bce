//! vidrepo Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by the storage and service crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{RepoConfig, VideoConfig};
pub use error::{ErrorKind, LogLevel, VideoError, VideoResult};
pub use models::{
    ContentEntry, Failure, ListState, OperationState, RemoteFile, UploadState, WriteRequest,
};
pub use storage_types::StoreBackend;
