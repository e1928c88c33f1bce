//! Configuration module
//!
//! Repository coordinates, credentials and upload limits. Everything is loaded from the
//! environment (optionally seeded by a `.env` file); the auth token has no default and is
//! never embedded in source.

use std::env;
use std::fmt;

use anyhow::Context;

use crate::constants::{
    BYTES_PER_MB, DEFAULT_API_BASE_URL, DEFAULT_BRANCH, DEFAULT_MAX_VIDEO_SIZE_MB,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::storage_types::StoreBackend;

/// Coordinates of the remote repository that holds the videos.
#[derive(Clone)]
pub struct RepoConfig {
    pub owner: String,
    pub repo_name: String,
    pub branch: String,
    /// Directory inside the repository, without leading or trailing slashes.
    pub base_path: String,
    pub auth_token: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub backend: StoreBackend,
}

// Hand-written so the token never reaches logs.
impl fmt::Debug for RepoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoConfig")
            .field("owner", &self.owner)
            .field("repo_name", &self.repo_name)
            .field("branch", &self.branch)
            .field("base_path", &self.base_path)
            .field("auth_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("backend", &self.backend)
            .finish()
    }
}

impl RepoConfig {
    /// Build a config with the required coordinates and defaults for everything else.
    pub fn new(
        owner: impl Into<String>,
        repo_name: impl Into<String>,
        base_path: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo_name: repo_name.into(),
            branch: DEFAULT_BRANCH.to_string(),
            base_path: normalize_base_path(&base_path.into()),
            auth_token: auth_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            backend: StoreBackend::Github,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.owner.trim().is_empty() {
            return Err(anyhow::anyhow!("VIDREPO_OWNER must not be empty"));
        }
        if self.repo_name.trim().is_empty() {
            return Err(anyhow::anyhow!("VIDREPO_REPO must not be empty"));
        }
        if self.branch.trim().is_empty() {
            return Err(anyhow::anyhow!("VIDREPO_BRANCH must not be empty"));
        }
        if self.base_path.contains("..") {
            return Err(anyhow::anyhow!("VIDREPO_BASE_PATH must not contain '..'"));
        }
        if self.backend == StoreBackend::Github {
            if self.auth_token.trim().is_empty() {
                return Err(anyhow::anyhow!(
                    "Missing auth token. Set VIDREPO_TOKEN or GITHUB_TOKEN"
                ));
            }
            if !self.api_base_url.starts_with("http://")
                && !self.api_base_url.starts_with("https://")
            {
                return Err(anyhow::anyhow!(
                    "VIDREPO_API_URL must start with http:// or https://"
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("VIDREPO_TIMEOUT_SECS must be greater than 0"));
        }
        Ok(())
    }
}

/// Full configuration for the upload/list service.
#[derive(Clone, Debug)]
pub struct VideoConfig {
    pub repo: RepoConfig,
    /// Largest accepted video, in bytes.
    pub max_video_size_bytes: usize,
    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,
}

impl VideoConfig {
    pub fn new(repo: RepoConfig) -> Self {
        Self {
            repo,
            max_video_size_bytes: DEFAULT_MAX_VIDEO_SIZE_MB * BYTES_PER_MB,
            log_json: false,
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, anyhow::Error> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("Missing required environment variable {}", key))
        };

        let backend = match lookup("VIDREPO_BACKEND") {
            Some(value) => value.parse::<StoreBackend>()?,
            None => StoreBackend::Github,
        };

        let auth_token = lookup("VIDREPO_TOKEN")
            .or_else(|| lookup("GITHUB_TOKEN"))
            .unwrap_or_default();

        let request_timeout_secs = match lookup("VIDREPO_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .context("VIDREPO_TIMEOUT_SECS must be a positive integer")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let max_video_size_mb = match lookup("VIDREPO_MAX_VIDEO_SIZE_MB") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .context("VIDREPO_MAX_VIDEO_SIZE_MB must be a positive integer")?,
            None => DEFAULT_MAX_VIDEO_SIZE_MB,
        };
        let max_video_size_bytes = max_video_size_mb
            .checked_mul(BYTES_PER_MB)
            .context("VIDREPO_MAX_VIDEO_SIZE_MB is too large")?;

        let repo = RepoConfig {
            owner: required("VIDREPO_OWNER")?,
            repo_name: required("VIDREPO_REPO")?,
            branch: lookup("VIDREPO_BRANCH")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            base_path: normalize_base_path(&required("VIDREPO_BASE_PATH")?),
            auth_token,
            api_base_url: lookup("VIDREPO_API_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs,
            backend,
        };

        let log_json = lookup("VIDREPO_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = Self {
            repo,
            max_video_size_bytes,
            log_json,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.repo.validate()?;
        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "VIDREPO_MAX_VIDEO_SIZE_MB must be greater than 0"
            ));
        }
        Ok(())
    }

    pub fn branch(&self) -> &str {
        &self.repo.branch
    }
}

fn normalize_base_path(path: &str) -> String {
    path.trim().trim_matches('/').to_string()
}
