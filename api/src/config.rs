//! Server configuration and tracing setup

use jm_infra::InfrastructureError;
use jm_shared::config::{AppConfig, LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration from `.env` and the process environment
pub fn load() -> Result<AppConfig, InfrastructureError> {
    jm_infra::load_config()
}

/// Default filter directive when `RUST_LOG` is not set
pub fn default_filter(logging: &LoggingConfig) -> String {
    format!("{},actix_web=info,sqlx=warn", logging.level)
}

/// Install the global tracing subscriber
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(logging)));

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
    }
}
