//! Domain models for remote files, write requests and operation state.

pub mod remote_file;
pub mod state;
pub mod write_request;

pub use remote_file::{ContentEntry, RemoteFile};
pub use state::{Failure, ListState, OperationState, UploadState};
pub use write_request::WriteRequest;
