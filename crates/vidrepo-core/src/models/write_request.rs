use serde::{Deserialize, Serialize};

use crate::constants::UPLOAD_COMMIT_PREFIX;

/// Body of a create-or-update file call. Built per upload and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    #[serde(rename = "message")]
    pub commit_message: String,
    /// Standard base64, padded, without line breaks.
    #[serde(rename = "content")]
    pub encoded_content: String,
    pub branch: String,
}

impl WriteRequest {
    /// Request for uploading `file_name` (already carrying its extension).
    pub fn upload(file_name: &str, encoded_content: String, branch: &str) -> Self {
        Self {
            commit_message: format!("{}{}", UPLOAD_COMMIT_PREFIX, file_name),
            encoded_content,
            branch: branch.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_commit_message() {
        let request = WriteRequest::upload("beach-trip.mp4", "AAEC".to_string(), "main");
        assert_eq!(request.commit_message, "Upload video: beach-trip.mp4");
        assert_eq!(request.branch, "main");
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let request = WriteRequest::upload("a.mp4", "aGk=".to_string(), "dev");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "Upload video: a.mp4",
                "content": "aGk=",
                "branch": "dev"
            })
        );
    }
}
