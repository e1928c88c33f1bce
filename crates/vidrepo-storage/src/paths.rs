//! Shared path building for store backends.
//!
//! Layout: `{base_path}/{file_name}`, or just `{file_name}` when the base path is empty.

use crate::traits::{StoreError, StoreResult};

/// Reject names that would escape the base directory or address a subdirectory.
pub fn validate_file_name(name: &str) -> StoreResult<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(StoreError::InvalidName(format!("'{}'", name)));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(StoreError::InvalidName(format!(
            "'{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}

/// Repository path of `file_name` under `base_path`.
pub fn file_path(base_path: &str, file_name: &str) -> String {
    if base_path.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", base_path, file_name)
    }
}

/// Percent-encode each segment of a repository path, keeping the separators.
#[cfg(feature = "store-github")]
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
