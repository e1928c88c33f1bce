//! Currently selected video, handed from the listing to the playback surface.

use tokio::sync::watch;
use vidrepo_core::RemoteFile;

use crate::state::StateCell;

/// Optional download URL of the video picked for playback.
#[derive(Debug, Default)]
pub struct VideoSelection {
    current: StateCell<Option<String>>,
}

impl VideoSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(url = %url, "Video selected");
        self.current.set(Some(url));
    }

    pub fn select_file(&self, file: &RemoteFile) {
        self.select(file.download_url.clone());
    }

    pub fn clear(&self) {
        self.current.set(None);
    }

    pub fn current(&self) -> Option<String> {
        self.current.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_clear() {
        let selection = VideoSelection::new();
        assert_eq!(selection.current(), None);

        selection.select("https://raw.example.com/videos/a.mp4");
        assert_eq!(
            selection.current().as_deref(),
            Some("https://raw.example.com/videos/a.mp4")
        );

        selection.clear();
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn test_select_file_uses_download_url() {
        let selection = VideoSelection::new();
        let file = RemoteFile {
            name: "a.mp4".to_string(),
            path: "videos/a.mp4".to_string(),
            content_hash: "abc".to_string(),
            size_bytes: 3,
            download_url: "https://raw.example.com/videos/a.mp4".to_string(),
        };
        let rx = selection.subscribe();

        selection.select_file(&file);

        assert_eq!(rx.borrow().as_deref(), Some(file.download_url.as_str()));
    }
}
