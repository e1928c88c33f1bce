//! Upload/list service
//!
//! Wraps a `RemoteStore` with size validation, base64 encoding and observable progress:
//! read → validate → encode → write for uploads, fetch → filter → publish for listings.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use vidrepo_core::constants::VIDEO_EXTENSION;
use vidrepo_core::{
    ListState, LogLevel, OperationState, RemoteFile, UploadState, VideoConfig, VideoError,
    VideoResult, WriteRequest,
};
use vidrepo_storage::{create_store, RemoteStore};

use super::payload::{encode_base64, read_limited};
use crate::source::{ByteSource, FileSource};
use crate::state::StateCell;

/// Stateful orchestration of video uploads and listings.
///
/// At most one upload and one listing run at a time; a competing call is rejected with
/// `VideoError::Busy` and leaves the published state untouched. Every other failure is
/// published as `Failed` and also returned to the caller.
pub struct UploadListService {
    store: Arc<dyn RemoteStore>,
    branch: String,
    max_video_size_bytes: usize,
    upload_state: StateCell<UploadState>,
    list_state: StateCell<ListState>,
    videos: StateCell<Vec<RemoteFile>>,
    upload_flight: Mutex<()>,
    list_flight: Mutex<()>,
}

impl UploadListService {
    pub fn new(store: Arc<dyn RemoteStore>, config: &VideoConfig) -> Self {
        Self {
            store,
            branch: config.branch().to_string(),
            max_video_size_bytes: config.max_video_size_bytes,
            upload_state: StateCell::default(),
            list_state: StateCell::default(),
            videos: StateCell::default(),
            upload_flight: Mutex::new(()),
            list_flight: Mutex::new(()),
        }
    }

    /// Build the store selected by `config.repo.backend` and wrap it.
    pub fn from_config(config: &VideoConfig) -> VideoResult<Self> {
        config
            .validate()
            .map_err(|e| VideoError::Config(e.to_string()))?;
        let store = create_store(&config.repo)?;
        Ok(Self::new(store, config))
    }

    /// Upload `source` as `{name}.mp4`.
    ///
    /// `name` is expected to be non-empty; only the size is validated here.
    pub async fn upload<S: ByteSource>(&self, name: &str, source: S) -> VideoResult<()> {
        let Ok(_flight) = self.upload_flight.try_lock() else {
            tracing::warn!(name = %name, "Upload rejected, another upload is in flight");
            return Err(VideoError::Busy("Upload"));
        };

        let in_flight = InFlight::start(&self.upload_state, "Upload");
        let file_name = format!("{}{}", name, VIDEO_EXTENSION);

        let result = self.run_upload(&file_name, source).await;
        match &result {
            Ok(()) => tracing::info!(file_name = %file_name, "Video uploaded"),
            Err(err) => log_failure("upload", &file_name, err),
        }

        in_flight.finish(OperationState::from_result(&result));
        result
    }

    /// Upload the file at `path` as `{name}.mp4`.
    pub async fn upload_file(&self, name: &str, path: impl AsRef<Path>) -> VideoResult<()> {
        self.upload(name, FileSource::new(path.as_ref())).await
    }

    /// Start an upload on the runtime and return immediately.
    pub fn spawn_upload<S>(
        self: &Arc<Self>,
        name: impl Into<String>,
        source: S,
    ) -> JoinHandle<VideoResult<()>>
    where
        S: ByteSource + 'static,
    {
        let service = Arc::clone(self);
        let name = name.into();
        tokio::spawn(async move { service.upload(&name, source).await })
    }

    // Buffers live only inside this call, so every exit path releases them.
    async fn run_upload<S: ByteSource>(&self, file_name: &str, source: S) -> VideoResult<()> {
        let buffer = read_limited(source, self.max_video_size_bytes).await?;
        let size_bytes = buffer.len();
        let encoded = encode_base64(&buffer)?;
        drop(buffer);

        tracing::info!(
            file_name = %file_name,
            size_bytes,
            encoded_len = encoded.len(),
            "Uploading video"
        );

        let request = WriteRequest::upload(file_name, encoded, &self.branch);
        self.store.put_file(file_name, &request).await?;
        Ok(())
    }

    /// Refresh the snapshot of uploaded videos.
    ///
    /// Keeps entries whose name ends in `.mp4` (exact case). On failure the previous
    /// snapshot stays in place.
    pub async fn list_videos(&self) -> VideoResult<()> {
        let Ok(_flight) = self.list_flight.try_lock() else {
            tracing::warn!("Listing rejected, another listing is in flight");
            return Err(VideoError::Busy("Listing"));
        };

        let in_flight = InFlight::start(&self.list_state, "Listing");

        match self.store.list_directory().await {
            Ok(files) => {
                let total = files.len();
                let videos: Vec<RemoteFile> =
                    files.into_iter().filter(RemoteFile::is_video).collect();
                tracing::info!(total, videos = videos.len(), "Listed videos");

                self.videos.set(videos);
                in_flight.finish(OperationState::Succeeded(()));
                Ok(())
            }
            Err(err) => {
                let err = VideoError::from(err);
                log_failure("list", "", &err);
                in_flight.finish(OperationState::Failed((&err).into()));
                Err(err)
            }
        }
    }

    /// Start a listing on the runtime and return immediately.
    pub fn spawn_list_videos(self: &Arc<Self>) -> JoinHandle<VideoResult<()>> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.list_videos().await })
    }

    pub fn upload_state(&self) -> UploadState {
        self.upload_state.get()
    }

    pub fn list_state(&self) -> ListState {
        self.list_state.get()
    }

    /// Videos from the last successful listing.
    pub fn videos(&self) -> Vec<RemoteFile> {
        self.videos.get()
    }

    pub fn subscribe_upload(&self) -> watch::Receiver<UploadState> {
        self.upload_state.subscribe()
    }

    pub fn subscribe_list(&self) -> watch::Receiver<ListState> {
        self.list_state.subscribe()
    }

    pub fn subscribe_videos(&self) -> watch::Receiver<Vec<RemoteFile>> {
        self.videos.subscribe()
    }
}

/// Owns the `InProgress` state of one call.
///
/// Dropped without `finish` (the caller abandoned the future), it publishes
/// `Failed(Cancelled)`. Declared after the flight guard, so the state is terminal before
/// the next call can get in.
struct InFlight<'a> {
    state: &'a StateCell<OperationState<()>>,
    operation: &'static str,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a StateCell<OperationState<()>>, operation: &'static str) -> Self {
        state.set(OperationState::InProgress);
        Self {
            state,
            operation,
            finished: false,
        }
    }

    fn finish(mut self, terminal: OperationState<()>) {
        self.finished = true;
        self.state.set(terminal);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let err = VideoError::Cancelled(self.operation);
        tracing::warn!(operation = self.operation, "Dropped before completion");
        self.state.set(OperationState::Failed((&err).into()));
    }
}

fn log_failure(operation: &str, file_name: &str, err: &VideoError) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(
            operation,
            file_name = %file_name,
            error_code = err.error_code(),
            error = %err,
            "Operation failed"
        ),
        LogLevel::Warn => tracing::warn!(
            operation,
            file_name = %file_name,
            error_code = err.error_code(),
            error = %err,
            "Operation failed"
        ),
        LogLevel::Error => tracing::error!(
            operation,
            file_name = %file_name,
            error_code = err.error_code(),
            error = %err,
            "Operation failed"
        ),
    }
}
