//! Shared application state for the server.
//!
//! [`AppState`] is built once at startup and injected into every handler
//! via Axum's `State` extractor. It is read-only: the catalog is fixed, the
//! provider client is shareable, and the renderer holds compiled templates.

use std::sync::Arc;

use fishwatch_core::catalog::Catalog;
use fishwatch_core::config::FishwatchConfig;
use fishwatch_provider::FishWatchClient;
use fishwatch_view::PageRenderer;

use crate::startup::StartupError;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// Species offered to users, in display order.
    pub catalog: Arc<Catalog>,
    /// Outbound FishWatch client.
    pub provider: FishWatchClient,
    /// Page renderer for `GET /`.
    pub renderer: Arc<PageRenderer>,
    /// Forward keys that are not in the catalog.
    pub allow_unlisted_species: bool,
}

impl AppState {
    /// Build state from configuration and a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if the provider client or the page
    /// template cannot be set up.
    pub fn new(config: &FishwatchConfig, catalog: Arc<Catalog>) -> Result<Self, StartupError> {
        let provider = FishWatchClient::new(&config.provider)?;
        let renderer = PageRenderer::new(&config.view)?;
        Ok(Self {
            catalog,
            provider,
            renderer: Arc::new(renderer),
            allow_unlisted_species: config.provider.allow_unlisted_species,
        })
    }
}
