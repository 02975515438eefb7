//! Proxy endpoint request and response shapes.
//!
//! | Direction | Shape |
//! |-----------|-------|
//! | view -> endpoint | [`FishRequest`] |
//! | endpoint -> view (200) | [`FishRecord`] |
//! | endpoint -> view (400) | [`ErrorPayload`] |
//!
//! [`FishResponse`] decodes either response body by its shape.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Message for any provider failure (bad status, transport, bad JSON).
pub const PROVIDER_FAILURE_MESSAGE: &str = "Something's wrong with FishWatch.";

/// Message when the provider answered but had no record for the key.
pub const NO_DATA_MESSAGE: &str = "That fish doesn't have data.";

/// Message when the inbound body is not a valid [`FishRequest`].
pub const MALFORMED_REQUEST_MESSAGE: &str = "Malformed request.";

/// Message when the key is not in the catalog.
pub const UNKNOWN_SPECIES_MESSAGE: &str = "That fish isn't in the catalog.";

/// Body of `POST /api/fish`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FishRequest {
    /// Species key chosen by the user.
    pub fish: String,
}

impl FishRequest {
    /// Build a request for the given species key.
    pub fn new(fish: impl Into<String>) -> Self {
        Self { fish: fish.into() }
    }
}

/// Normalized species record returned by the proxy endpoint.
///
/// The text fields carry the provider's HTML fragments untouched; markup is
/// stripped at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FishRecord {
    /// Species name as published by the provider.
    pub species_name: String,
    /// Physical description (may contain HTML).
    pub physical_description: String,
    /// Health benefits (may contain HTML).
    pub health_benefits: String,
    /// URL of the first gallery image, if the provider has one.
    pub image: Option<String>,
}

/// Error body returned with every non-200 proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorPayload {
    /// User-visible message.
    pub error: String,
}

impl ErrorPayload {
    /// Wrap a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl ErrorPayload {
    /// The provider failed or answered with something unusable.
    pub fn provider_failure() -> Self {
        Self::new(PROVIDER_FAILURE_MESSAGE)
    }

    /// The provider had no record for the key.
    pub fn no_data() -> Self {
        Self::new(NO_DATA_MESSAGE)
    }
}

/// Either response body of the proxy endpoint, decoded by shape.
///
/// An object carrying an `error` field is an [`ErrorPayload`]; anything
/// matching the record fields is a [`FishRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum FishResponse {
    /// The endpoint reported a failure.
    Error(ErrorPayload),
    /// The endpoint returned a species record.
    Record(FishRecord),
}

impl FishResponse {
    /// Convert into a `Result`, treating the error payload as `Err`.
    pub fn into_result(self) -> Result<FishRecord, ErrorPayload> {
        match self {
            Self::Record(record) => Ok(record),
            Self::Error(payload) => Err(payload),
        }
    }
}

impl From<FishRecord> for FishResponse {
    fn from(record: FishRecord) -> Self {
        Self::Record(record)
    }
}

impl From<ErrorPayload> for FishResponse {
    fn from(payload: ErrorPayload) -> Self {
        Self::Error(payload)
    }
}
