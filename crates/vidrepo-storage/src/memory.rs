use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use vidrepo_core::{RemoteFile, RepoConfig, StoreBackend, WriteRequest};

use crate::paths::{file_path, validate_file_name};
use crate::traits::{RemoteStore, StoreError, StoreResult};

struct StoredFile {
    data: Vec<u8>,
    content_hash: String,
    commit_message: String,
}

/// In-memory store implementation
///
/// Decodes written content, keeps it keyed by file name and lists it back in name order,
/// like the contents API does.
pub struct InMemoryStore {
    url_prefix: String,
    branch: String,
    base_path: String,
    files: RwLock<BTreeMap<String, StoredFile>>,
}

impl InMemoryStore {
    pub fn new(config: &RepoConfig) -> Self {
        Self {
            url_prefix: format!(
                "memory://{}/{}/{}",
                config.owner, config.repo_name, config.branch
            ),
            branch: config.branch.clone(),
            base_path: config.base_path.clone(),
            files: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store raw bytes directly, bypassing the base64 request path.
    pub async fn insert(&self, file_name: &str, data: Vec<u8>) -> StoreResult<()> {
        validate_file_name(file_name)?;
        let content_hash = content_hash(&data);
        self.files.write().await.insert(
            file_name.to_string(),
            StoredFile {
                data,
                content_hash,
                commit_message: String::new(),
            },
        );
        Ok(())
    }

    /// Decoded bytes of a stored file.
    pub async fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.files
            .read()
            .await
            .get(file_name)
            .map(|file| file.data.clone())
    }

    /// Commit message recorded by the last write of `file_name`.
    pub async fn commit_message(&self, file_name: &str) -> Option<String> {
        self.files
            .read()
            .await
            .get(file_name)
            .map(|file| file.commit_message.clone())
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

fn content_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn put_file(&self, relative_name: &str, request: &WriteRequest) -> StoreResult<()> {
        validate_file_name(relative_name)?;

        if request.branch != self.branch {
            return Err(StoreError::Remote {
                status: 404,
                body: format!("Branch {} not found", request.branch),
            });
        }

        let data = STANDARD
            .decode(request.encoded_content.as_bytes())
            .map_err(|e| StoreError::Remote {
                status: 422,
                body: format!("content is not valid Base64: {}", e),
            })?;

        let content_hash = content_hash(&data);
        tracing::debug!(
            name = %relative_name,
            size = data.len(),
            "Stored file in memory"
        );

        self.files.write().await.insert(
            relative_name.to_string(),
            StoredFile {
                data,
                content_hash,
                commit_message: request.commit_message.clone(),
            },
        );
        Ok(())
    }

    async fn list_directory(&self) -> StoreResult<Vec<RemoteFile>> {
        let files = self.files.read().await;
        Ok(files
            .iter()
            .map(|(name, file)| {
                let path = file_path(&self.base_path, name);
                RemoteFile {
                    name: name.clone(),
                    download_url: format!("{}/{}", self.url_prefix, path),
                    path,
                    content_hash: file.content_hash.clone(),
                    size_bytes: file.data.len() as u64,
                }
            })
            .collect())
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> InMemoryStore {
        InMemoryStore::new(&RepoConfig::new("octo", "clips", "videos", ""))
    }

    #[tokio::test]
    async fn test_put_then_list() {
        let store = test_store();
        let request = WriteRequest::upload("a.mp4", STANDARD.encode(b"hello"), "main");

        store.put_file("a.mp4", &request).await.unwrap();

        assert_eq!(store.get("a.mp4").await.unwrap(), b"hello");
        assert_eq!(
            store.commit_message("a.mp4").await.unwrap(),
            "Upload video: a.mp4"
        );

        let listed = store.list_directory().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "a.mp4");
        assert_eq!(listed[0].path, "videos/a.mp4");
        assert_eq!(listed[0].size_bytes, 5);
        assert_eq!(listed[0].download_url, "memory://octo/clips/main/videos/a.mp4");
        assert_eq!(
            listed[0].content_hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_file() {
        let store = test_store();
        let first = WriteRequest::upload("a.mp4", STANDARD.encode(b"one"), "main");
        let second = WriteRequest::upload("a.mp4", STANDARD.encode(b"two"), "main");

        store.put_file("a.mp4", &first).await.unwrap();
        store.put_file("a.mp4", &second).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("a.mp4").await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_invalid_base64_is_rejected() {
        let store = test_store();
        let request = WriteRequest::upload("a.mp4", "not base64!".to_string(), "main");

        let result = store.put_file("a.mp4", &request).await;
        assert!(matches!(result, Err(StoreError::Remote { status: 422, .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_branch_is_rejected() {
        let store = test_store();
        let request = WriteRequest::upload("a.mp4", STANDARD.encode(b"x"), "dev");

        let result = store.put_file("a.mp4", &request).await;
        assert!(matches!(result, Err(StoreError::Remote { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let store = test_store();
        let request = WriteRequest::upload("x", STANDARD.encode(b"x"), "main");

        let result = store.put_file("../escape.mp4", &request).await;
        assert!(matches!(result, Err(StoreError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_empty_by_default() {
        let store = test_store();
        assert!(store.list_directory().await.unwrap().is_empty());

        store.insert("b.mov", vec![1]).await.unwrap();
        store.insert("a.mp4", vec![2]).await.unwrap();

        let names: Vec<String> = store
            .list_directory()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["a.mp4", "b.mov"]);
    }
}
