//! Tracing subscriber initialisation.

mod init_basic;

pub use init_basic::{init_from_config, init_telemetry, shutdown_telemetry, LogFormat};
