//! vidrepo Storage Library
//!
//! This crate provides the `RemoteStore` abstraction over a repository-contents API and
//! its implementations: a GitHub-compatible REST client and an in-memory store.
//!
//! # Path layout
//!
//! Every file lives directly under the configured base path:
//! `{base_path}/{file_name}`. Path building is centralized in the `paths` module so both
//! backends agree on it.

pub mod factory;
#[cfg(feature = "store-github")]
pub mod github;
#[cfg(feature = "store-memory")]
pub mod memory;
pub(crate) mod paths;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
#[cfg(feature = "store-github")]
pub use github::ContentsApiStore;
#[cfg(feature = "store-memory")]
pub use memory::InMemoryStore;
pub use traits::{RemoteStore, StoreError, StoreResult};
pub use vidrepo_core::StoreBackend;
