//! Shared infrastructure for vidrepo clients.
//!
//! Currently only tracing initialisation; the library crates log through `tracing`
//! and leave subscriber setup to the host process.

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_from_config, init_telemetry, shutdown_telemetry, LogFormat};
