//! Server startup: state construction and the serve loop.
//!
//! [`run`] is what the binary calls once configuration is loaded. It
//! builds the catalog and [`AppState`], then serves until shutdown.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fishwatch_core::config::FishwatchConfig;
//!
//! let config = FishwatchConfig::load()?;
//! fishwatch_server::startup::run(&config).await?;
//! ```

use std::sync::Arc;

use fishwatch_core::catalog::Catalog;
use fishwatch_core::config::FishwatchConfig;
use fishwatch_provider::ProviderError;
use fishwatch_view::ViewError;
use tracing::info;

use crate::server::{ServerError, start_server};
use crate::state::AppState;

/// Errors that can occur while starting the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The provider client could not be built.
    #[error("provider setup error: {0}")]
    Provider(#[from] ProviderError),

    /// The page renderer could not be built.
    #[error("view setup error: {0}")]
    View(#[from] ViewError),

    /// The server failed to bind or serve.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Build state from `config` with the default catalog and serve until
/// shutdown.
///
/// # Errors
///
/// Returns [`StartupError`] if state construction, binding, or serving
/// fails.
pub async fn run(config: &FishwatchConfig) -> Result<(), StartupError> {
    let catalog = Arc::new(Catalog::fishwatch());
    info!(species = catalog.len(), "species catalog loaded");

    let state = Arc::new(AppState::new(config, catalog)?);
    info!(
        provider = config.provider.base_url,
        timeout_ms = config.provider.request_timeout_ms,
        allow_unlisted_species = config.provider.allow_unlisted_species,
        "provider client configured"
    );

    start_server(&config.server, state).await?;
    Ok(())
}
