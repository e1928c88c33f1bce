use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidrepo_core::VideoConfig;

const DEFAULT_FILTER: &str = "vidrepo=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `vidrepo=debug` filter. Fails if a global
/// subscriber is already set.
pub fn init_telemetry(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()?;

    tracing::debug!(?format, "Telemetry initialized");
    Ok(())
}

pub fn init_from_config(config: &VideoConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_telemetry(LogFormat::from_json_flag(config.log_json))
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
