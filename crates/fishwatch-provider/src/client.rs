//! HTTP client for `GET /api/species/{key}`.

use std::time::Duration;

use fishwatch_core::config::ProviderConfig;
use fishwatch_types::FishRecord;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::payload::ProviderPayload;

/// `User-Agent` sent with every provider request.
const USER_AGENT: &str = concat!("fishwatch-viewer/", env!("CARGO_PKG_VERSION"));

/// Client for the FishWatch species API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct FishWatchClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl FishWatchClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Client`] if the base URL does not parse or
    /// cannot carry a path, or if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProviderError::Client(format!("invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::Client(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        let timeout = config.request_timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The configured request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build `{base}/api/species/{key}` with `key` as one percent-encoded
    /// path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidKey`] for keys that are blank or are
    /// the relative segments `.` / `..`.
    pub fn species_url(&self, key: &str) -> Result<Url, ProviderError> {
        if key.trim().is_empty() || key == "." || key == ".." {
            return Err(ProviderError::InvalidKey(key.to_owned()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::Client(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["api", "species", key]);
        Ok(url)
    }

    /// Fetch one species and normalize it.
    ///
    /// Makes exactly one request. Any status other than 200 is a failure,
    /// including other 2xx codes.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::InvalidKey`] if the key cannot form a path segment
    /// - [`ProviderError::Timeout`] / [`ProviderError::Transport`] on network failure
    /// - [`ProviderError::Status`] for a non-200 answer
    /// - [`ProviderError::Decode`] for a body that is not usable JSON
    /// - [`ProviderError::NoData`] when the body holds no record
    pub async fn fetch_species(&self, key: &str) -> Result<FishRecord, ProviderError> {
        let url = self.species_url(key)?;
        debug!(%url, "requesting species from provider");

        let response = self.client.get(url).send().await.inspect_err(|e| {
            warn!(species = key, error = %e, "provider request failed");
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(species = key, status = status.as_u16(), "provider returned non-200");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload = ProviderPayload::from_slice(&body).inspect_err(|e| {
            warn!(species = key, error = %e, "provider body could not be decoded");
        })?;

        let record = payload.into_record()?;
        debug!(species = key, name = %record.species_name, "species normalized");
        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Result<FishWatchClient, ProviderError> {
        FishWatchClient::new(&ProviderConfig {
            base_url: base_url.to_owned(),
            request_timeout_ms: 1000,
            allow_unlisted_species: false,
        })
    }

    #[test]
    fn species_url_shape() {
        let url = client("https://www.fishwatch.gov")
            .and_then(|c| c.species_url("gag-grouper"))
            .map(String::from);
        assert_eq!(
            url.ok().as_deref(),
            Some("https://www.fishwatch.gov/api/species/gag-grouper")
        );
    }

    #[test]
    fn species_url_keeps_base_path() {
        let url = client("http://localhost:9000/mirror/")
            .and_then(|c| c.species_url("red-snapper"))
            .map(String::from);
        assert_eq!(
            url.ok().as_deref(),
            Some("http://localhost:9000/mirror/api/species/red-snapper")
        );
    }

    #[test]
    fn species_url_encodes_key_as_one_segment() {
        let url = client("https://www.fishwatch.gov")
            .and_then(|c| c.species_url("a/b?c#d"))
            .map(String::from);
        assert_eq!(
            url.ok().as_deref(),
            Some("https://www.fishwatch.gov/api/species/a%2Fb%3Fc%23d")
        );
    }

    #[test]
    fn relative_and_blank_keys_rejected() {
        let client = client("https://www.fishwatch.gov").unwrap();
        for key in ["", " ", ".", ".."] {
            assert!(matches!(
                client.species_url(key),
                Err(ProviderError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn unusable_base_url_rejected() {
        assert!(matches!(client("not a url"), Err(ProviderError::Client(_))));
        assert!(matches!(client("mailto:fish@example.com"), Err(ProviderError::Client(_))));
    }
}
