//! HTTP endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Rendered selector page (`?fish=<key>` selects) |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/api/species` | Species catalog |
//! | `POST` | `/api/fish` | Proxy endpoint |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use fishwatch_types::{FishRecord, FishRequest};
use fishwatch_view::SelectorView;
use tracing::{debug, info};

use crate::error::ProxyError;
use crate::proxy::{self, ProxySource};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /`.
#[derive(Debug, serde::Deserialize)]
pub struct IndexQuery {
    /// Species key to select. Empty or absent shows the idle page.
    pub fish: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/fish -- proxy endpoint
// ---------------------------------------------------------------------------

/// Forward a species key to the provider and return the normalized record.
///
/// The body is parsed as JSON whatever its declared content type, since
/// browsers posting a bare string send `text/plain`.
///
/// # Responses
///
/// - `200` with a [`FishRecord`]
/// - `400` with `{ "error": ... }` for a malformed body, an unknown key,
///   a provider failure, or a species without data
pub async fn post_fish(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<FishRecord>, ProxyError> {
    let request: FishRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "rejecting malformed fish request");
        ProxyError::MalformedRequest(e.to_string())
    })?;

    let record = proxy::lookup(&state, &request.fish).await?;
    info!(species = %request.fish, "fish record served");
    Ok(Json(record))
}

// ---------------------------------------------------------------------------
// GET /api/species -- catalog
// ---------------------------------------------------------------------------

/// List the selectable species in catalog order.
pub async fn list_species(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "count": state.catalog.len(),
        "species": state.catalog.entries(),
    }))
}

// ---------------------------------------------------------------------------
// GET / -- rendered selector view
// ---------------------------------------------------------------------------

/// Render the selector page, fetching the selected species if any.
///
/// Failures to fetch show up inside the page; only a template failure
/// produces an error response.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, ProxyError> {
    let mut view = SelectorView::new(Arc::clone(&state.catalog));

    if let Some(key) = query.fish.as_deref().filter(|k| !k.is_empty()) {
        view.select(&ProxySource::new(&state), key).await;
    }

    Ok(Html(state.renderer.render(&view)?))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
