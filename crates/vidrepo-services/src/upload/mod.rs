//! Upload and listing orchestration

mod payload;
mod service;

pub use payload::{encode_base64, read_limited};
pub use service::UploadListService;
