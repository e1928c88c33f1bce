//! Shared constants

/// One mebibyte, the unit used for size limits and size messages.
pub const BYTES_PER_MB: usize = 1024 * 1024;

/// Default upload ceiling in whole megabytes.
pub const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 25;

/// Default upload ceiling in bytes (25 MiB).
pub const DEFAULT_MAX_VIDEO_SIZE_BYTES: usize = DEFAULT_MAX_VIDEO_SIZE_MB * BYTES_PER_MB;

/// Suffix appended to uploaded names and used to filter listings (case-sensitive).
pub const VIDEO_EXTENSION: &str = ".mp4";

pub const DEFAULT_BRANCH: &str = "main";

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Commit message prefix for uploads; the full file name follows.
pub const UPLOAD_COMMIT_PREFIX: &str = "Upload video: ";
