//! FishWatch viewer server entry point.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `fishwatch-config.yaml` (plus env overrides)
//! 2. Initialize structured logging (tracing)
//! 3. Build the species catalog, provider client, and page renderer
//! 4. Serve until `Ctrl-C` / `SIGTERM`

use fishwatch_core::config::{FishwatchConfig, LoggingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, startup, or serving fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = FishwatchConfig::load()?;

    init_tracing(&config.logging);

    info!(
        host = config.server.host,
        port = config.server.port,
        provider = config.provider.base_url,
        "fishwatch-server starting"
    );

    fishwatch_server::startup::run(&config).await?;

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the config level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
