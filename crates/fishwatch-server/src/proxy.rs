//! The lookup path shared by the proxy endpoint and the rendered page.
//!
//! [`lookup`] resolves a key against the catalog, calls the provider once,
//! and returns the normalized record. [`ProxySource`] exposes the same
//! path to a [`SelectorView`](fishwatch_view::SelectorView) in-process.

use fishwatch_types::{FishRecord, FishResponse};
use fishwatch_view::{FishSource, ViewError};
use tracing::debug;

use crate::error::ProxyError;
use crate::state::AppState;

/// Resolve `key` and fetch its record from the provider.
///
/// Keys outside the catalog are rejected before any outbound call unless
/// unlisted species are allowed, in which case the provider client
/// percent-encodes the key into a single path segment.
///
/// # Errors
///
/// Returns [`ProxyError::UnknownSpecies`] for a rejected key and
/// [`ProxyError::Provider`] for any provider failure.
pub async fn lookup(state: &AppState, key: &str) -> Result<FishRecord, ProxyError> {
    if !state.allow_unlisted_species && !state.catalog.contains(key) {
        debug!(species = key, "rejecting key not in catalog");
        return Err(ProxyError::UnknownSpecies(key.to_owned()));
    }
    Ok(state.provider.fetch_species(key).await?)
}

/// [`FishSource`] backed directly by [`lookup`].
///
/// Produces exactly the bodies `POST /api/fish` would: a record, or the
/// error payload the endpoint would have sent.
#[derive(Clone, Copy)]
pub struct ProxySource<'a> {
    state: &'a AppState,
}

impl<'a> ProxySource<'a> {
    /// Wrap shared state.
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl FishSource for ProxySource<'_> {
    async fn fetch(&self, key: &str) -> Result<FishResponse, ViewError> {
        Ok(match lookup(self.state, key).await {
            Ok(record) => FishResponse::Record(record),
            Err(e) => FishResponse::Error(e.to_payload()),
        })
    }
}
