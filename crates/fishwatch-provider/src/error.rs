//! Error types for provider calls.

use fishwatch_types::ErrorPayload;

/// Errors that can occur while fetching and normalizing a species.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP client could not be built, or the base URL is unusable.
    #[error("provider client error: {0}")]
    Client(String),

    /// The key cannot be placed in the request path.
    #[error("invalid species key: {0:?}")]
    InvalidKey(String),

    /// The request did not complete within the configured timeout.
    #[error("provider request timed out")]
    Timeout,

    /// Connection, TLS, or body read failure.
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The provider answered with a status other than 200.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The 200 body was not valid JSON, or its first record had the wrong shape.
    #[error("provider response parse failed: {0}")]
    Decode(String),

    /// The body was empty, `null`, an empty array, or not an array.
    #[error("provider has no record for this species")]
    NoData,
}

impl ProviderError {
    /// The user-visible payload for this error.
    ///
    /// Only "no data" is distinguished; every other provider failure shares
    /// one generic message.
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            Self::NoData => ErrorPayload::no_data(),
            _ => ErrorPayload::provider_failure(),
        }
    }

    /// Whether the failure originates at the provider rather than in the
    /// request we were asked to make.
    pub const fn is_upstream(&self) -> bool {
        !matches!(self, Self::InvalidKey(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e.to_string())
        }
    }
}
