//! Error types for the proxy endpoint and rendered page.
//!
//! [`ProxyError`] unifies all request failure modes into a single enum
//! that converts into an Axum HTTP response. Every response body has the
//! shape `{ "error": "<message>" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fishwatch_provider::ProviderError;
use fishwatch_types::{ErrorPayload, MALFORMED_REQUEST_MESSAGE, UNKNOWN_SPECIES_MESSAGE};
use fishwatch_view::ViewError;

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The request body is not JSON or lacks a string `fish` field.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The key is not in the catalog and unlisted keys are not forwarded.
    #[error("unknown species: {0:?}")]
    UnknownSpecies(String),

    /// The provider call failed or returned no usable record.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The page could not be rendered.
    #[error("page render failed: {0}")]
    Render(#[from] ViewError),
}

impl ProxyError {
    /// HTTP status for this error.
    ///
    /// Every request-level failure is a 400, matching what clients of the
    /// endpoint expect. Only a broken page template is a server error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) | Self::UnknownSpecies(_) | Self::Provider(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-visible payload for this error.
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            Self::MalformedRequest(_) => ErrorPayload::new(MALFORMED_REQUEST_MESSAGE),
            Self::UnknownSpecies(_) => ErrorPayload::new(UNKNOWN_SPECIES_MESSAGE),
            Self::Provider(e) if !e.is_upstream() => ErrorPayload::new(MALFORMED_REQUEST_MESSAGE),
            Self::Provider(e) => e.to_payload(),
            Self::Render(_) => ErrorPayload::new("The page could not be rendered."),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_payload())).into_response()
    }
}
