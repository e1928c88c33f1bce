#[cfg(feature = "store-github")]
use crate::ContentsApiStore;
#[cfg(feature = "store-memory")]
use crate::InMemoryStore;
use crate::{RemoteStore, StoreBackend, StoreError, StoreResult};
use std::sync::Arc;
use vidrepo_core::RepoConfig;

/// Create a remote store based on configuration
pub fn create_store(config: &RepoConfig) -> StoreResult<Arc<dyn RemoteStore>> {
    config
        .validate()
        .map_err(|e| StoreError::ConfigError(e.to_string()))?;

    match config.backend {
        #[cfg(feature = "store-github")]
        StoreBackend::Github => {
            let store = ContentsApiStore::new(config)?;
            tracing::info!(
                owner = %config.owner,
                repo = %config.repo_name,
                branch = %config.branch,
                base_path = %config.base_path,
                "Using repository contents API store"
            );
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-github"))]
        StoreBackend::Github => Err(StoreError::ConfigError(
            "GitHub store backend not available (store-github feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-memory")]
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new(config)))
        }

        #[cfg(not(feature = "store-memory"))]
        StoreBackend::Memory => Err(StoreError::ConfigError(
            "Memory store backend not available (store-memory feature not enabled)".to_string(),
        )),
    }
}
