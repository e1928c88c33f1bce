//! Repository contents API client (GitHub-compatible).
//!
//! `PUT  /repos/{owner}/{repo}/contents/{path}` creates or updates a file from a base64
//! payload; `GET /repos/{owner}/{repo}/contents/{path}` lists a directory.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use vidrepo_core::{ContentEntry, RemoteFile, RepoConfig, StoreBackend, WriteRequest};

use crate::paths::{encode_path, file_path, validate_file_name};
use crate::traits::{RemoteStore, StoreError, StoreResult};

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("vidrepo/", env!("CARGO_PKG_VERSION"));

/// Store backed by a remote repository through its contents REST API.
#[derive(Clone)]
pub struct ContentsApiStore {
    client: Client,
    api_base_url: String,
    owner: String,
    repo_name: String,
    branch: String,
    base_path: String,
    auth_token: String,
}

impl ContentsApiStore {
    pub fn new(config: &RepoConfig) -> StoreResult<Self> {
        if config.auth_token.trim().is_empty() {
            return Err(StoreError::ConfigError(
                "Missing auth token. Set VIDREPO_TOKEN or GITHUB_TOKEN".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo_name: config.repo_name.clone(),
            branch: config.branch.clone(),
            base_path: config.base_path.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Contents URL for a repository path. An empty path addresses the repository root.
    pub fn contents_url(&self, path: &str) -> String {
        let encoded = encode_path(path);
        let mut url = format!(
            "{}/repos/{}/{}/contents",
            self.api_base_url,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo_name)
        );
        if !encoded.is_empty() {
            url.push('/');
            url.push_str(&encoded);
        }
        url
    }

    fn apply_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Accept", ACCEPT_HEADER)
            .header(API_VERSION_HEADER, API_VERSION)
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Transport(format!("Request timed out: {}", err))
    } else {
        StoreError::Transport(format!("Failed to send request: {}", err))
    }
}

async fn remote_error(response: Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    StoreError::Remote { status, body }
}

#[async_trait]
impl RemoteStore for ContentsApiStore {
    async fn put_file(&self, relative_name: &str, request: &WriteRequest) -> StoreResult<()> {
        validate_file_name(relative_name)?;
        let path = file_path(&self.base_path, relative_name);
        let url = self.contents_url(&path);

        tracing::debug!(
            path = %path,
            branch = %request.branch,
            encoded_len = request.encoded_content.len(),
            "Putting file to remote repository"
        );

        let response = self
            .apply_headers(self.client.put(&url).json(request))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let err = remote_error(response).await;
            tracing::error!(path = %path, error = %err, "Remote write failed");
            return Err(err);
        }

        tracing::info!(path = %path, "Remote write succeeded");
        Ok(())
    }

    async fn list_directory(&self) -> StoreResult<Vec<RemoteFile>> {
        let url = self.contents_url(&self.base_path);

        let response = self
            .apply_headers(self.client.get(&url))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // The directory only exists once something has been committed into it.
            tracing::warn!(path = %self.base_path, "Remote directory not found, treating as empty");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(remote_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(format!("Failed to read response: {}", e)))?;
        let entries: Vec<ContentEntry> = serde_json::from_str(&body)
            .map_err(|e| StoreError::Decode(format!("expected a directory listing: {}", e)))?;

        let total = entries.len();
        let files: Vec<RemoteFile> = entries
            .into_iter()
            .filter_map(|entry| {
                let name = entry.name.clone();
                let file = entry.into_remote_file();
                if file.is_none() {
                    tracing::debug!(name = %name, "Skipping listing entry without download URL");
                }
                file
            })
            .collect();

        tracing::debug!(total, files = files.len(), "Listed remote directory");
        Ok(files)
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Github
    }
}
