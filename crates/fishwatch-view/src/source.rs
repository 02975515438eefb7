//! Where the view gets species records from.
//!
//! [`FishSource`] is the seam between the view and the proxy endpoint. The
//! browser-style path is [`HttpFishSource`], which posts to
//! `POST /api/fish`. A server that renders the view itself can implement
//! the trait in-process instead of calling itself over HTTP.

use std::future::Future;
use std::time::Duration;

use fishwatch_core::config::ViewConfig;
use fishwatch_types::{FishRequest, FishResponse};
use reqwest::Url;
use tracing::debug;

use crate::error::ViewError;

/// A source of proxy endpoint responses.
///
/// Implementations return the endpoint's answer as a [`FishResponse`]; an
/// error payload is a normal answer, not an `Err`. `Err` is reserved for
/// failing to get any answer at all.
pub trait FishSource {
    /// Ask for the record behind `key`.
    fn fetch(&self, key: &str) -> impl Future<Output = Result<FishResponse, ViewError>> + Send;
}

/// [`FishSource`] that calls the proxy endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFishSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpFishSource {
    /// Create a source posting to `endpoint` (e.g. `http://localhost:3000/api/fish`).
    ///
    /// Every call is abandoned after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Transport`] if the URL does not parse or the
    /// client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ViewError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ViewError::Transport(format!("invalid endpoint URL {endpoint:?}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ViewError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Create a source from `view.endpoint_url` and `view.request_timeout_ms`.
    ///
    /// # Errors
    ///
    /// See [`HttpFishSource::new`].
    pub fn from_config(config: &ViewConfig) -> Result<Self, ViewError> {
        Self::new(&config.endpoint_url, config.request_timeout())
    }

    /// The endpoint this source posts to.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl FishSource for HttpFishSource {
    async fn fetch(&self, key: &str) -> Result<FishResponse, ViewError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&FishRequest::new(key))
            .send()
            .await
            .map_err(|e| ViewError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ViewError::Transport(e.to_string()))?;

        debug!(species = key, status, bytes = body.len(), "endpoint answered");

        // Both 200 and 400 carry JSON; the shape decides which one it is.
        serde_json::from_slice(&body).map_err(|e| ViewError::Decode {
            status,
            message: e.to_string(),
        })
    }
}
