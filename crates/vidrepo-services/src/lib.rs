//! vidrepo Services
//!
//! Stateful orchestration on top of a `RemoteStore`: uploading videos from byte sources,
//! listing uploaded videos, and publishing observable progress for both operations.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vidrepo_core::VideoConfig;
//! use vidrepo_services::{MemorySource, UploadListService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VideoConfig::from_env()?;
//! let service = Arc::new(UploadListService::from_config(&config)?);
//!
//! service.upload("beach-trip", MemorySource::new(vec![0u8; 1024])).await?;
//! service.list_videos().await?;
//! for video in service.videos() {
//!     println!("{} -> {}", video.name, video.download_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod selection;
pub mod source;
pub mod state;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use selection::VideoSelection;
pub use source::{ByteSource, FileSource, MemorySource, OpenedSource, ReaderSource};
pub use state::StateCell;
pub use upload::UploadListService;
