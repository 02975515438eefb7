//! Error types for the selector view.

/// Message shown when the endpoint could not be reached or understood.
pub const UNREACHABLE_MESSAGE: &str = "Couldn't load that fish. Try again.";

/// Errors that can occur while fetching or rendering in the view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The endpoint could not be reached, or the HTTP client failed.
    #[error("endpoint request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a body that is neither a record nor an
    /// error payload.
    #[error("endpoint response could not be decoded (status {status}): {message}")]
    Decode {
        /// HTTP status of the response.
        status: u16,
        /// Parser message.
        message: String,
    },

    /// A page template failed to load or render.
    #[error("template error: {0}")]
    Template(String),
}
