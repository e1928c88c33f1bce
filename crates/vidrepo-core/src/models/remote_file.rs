use serde::{Deserialize, Serialize};

use crate::constants::VIDEO_EXTENSION;

/// One file in the remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    pub path: String,
    #[serde(rename = "sha")]
    pub content_hash: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    pub download_url: String,
}

impl RemoteFile {
    /// Exact, case-sensitive `.mp4` suffix check.
    pub fn is_video(&self) -> bool {
        self.name.ends_with(VIDEO_EXTENSION)
    }
}

/// Raw entry of a contents-API directory listing.
///
/// Directories, symlinks and submodules share the shape but have no download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(rename = "type", default = "default_entry_type")]
    pub entry_type: String,
}

fn default_entry_type() -> String {
    "file".to_string()
}

impl ContentEntry {
    /// Convert into a `RemoteFile`, or `None` for non-file entries and files without a
    /// download URL.
    pub fn into_remote_file(self) -> Option<RemoteFile> {
        if self.entry_type != "file" {
            return None;
        }
        let download_url = self.download_url.filter(|url| !url.is_empty())?;
        Some(RemoteFile {
            name: self.name,
            path: self.path,
            content_hash: self.sha,
            size_bytes: self.size,
            download_url,
        })
    }
}
