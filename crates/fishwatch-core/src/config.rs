//! Configuration loading and typed config structures.
//!
//! The configuration lives in `fishwatch-config.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure, fills every
//! missing field with a default, and validates the result. The file
//! loaders also apply environment overrides; [`FishwatchConfig::parse`]
//! does not.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable naming the config file path.
pub const CONFIG_PATH_ENV: &str = "FISHWATCH_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "fishwatch-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FishwatchConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound FishWatch provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Selector view settings.
    #[serde(default)]
    pub view: ViewConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FishwatchConfig {
    /// Load configuration from a YAML file at the given path, then apply
    /// environment overrides and validate.
    ///
    /// Environment variables override YAML values:
    /// - `FISHWATCH_HOST` overrides `server.host`
    /// - `FISHWATCH_PORT` overrides `server.port`
    /// - `FISHWATCH_PROVIDER_URL` overrides `provider.base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::deserialize_yaml(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string and validate it.
    ///
    /// The process environment is not consulted; see
    /// [`FishwatchConfig::from_file`] and [`FishwatchConfig::load`] for
    /// the overriding loaders.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::deserialize_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn deserialize_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            Ok(Self::default())
        } else {
            Ok(serde_yml::from_str(yaml)?)
        }
    }

    /// Load from `FISHWATCH_CONFIG` (or `fishwatch-config.yaml`).
    ///
    /// A missing file is not an error: defaults plus environment overrides
    /// are used instead.
    ///
    /// # Errors
    ///
    /// Returns any error from [`FishwatchConfig::from_file`] other than the
    /// file being absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        let path = Path::new(&path);
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            Ok(config)
        }
    }

    /// Override fields with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `FISHWATCH_PORT` is not a port.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override fields from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `FISHWATCH_PORT` is not a port.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FISHWATCH_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("FISHWATCH_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::Invalid {
                field: "server.port",
                reason: format!("FISHWATCH_PORT={val}: {e}"),
            })?;
        }
        if let Some(val) = lookup("FISHWATCH_PROVIDER_URL") {
            self.provider.base_url = val;
        }
        Ok(())
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.provider.base_url) {
            return Err(ConfigError::Invalid {
                field: "provider.base_url",
                reason: format!("expected an http(s) URL, got {:?}", self.provider.base_url),
            });
        }
        if self.provider.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.request_timeout_ms",
                reason: String::from("must be greater than zero"),
            });
        }
        if self.view.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "view.request_timeout_ms",
                reason: String::from("must be greater than zero"),
            });
        }
        if !is_http_url(&self.view.endpoint_url) {
            return Err(ConfigError::Invalid {
                field: "view.endpoint_url",
                reason: format!("expected an http(s) URL, got {:?}", self.view.endpoint_url),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "server.host",
                reason: String::from("must not be empty"),
            });
        }
        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty())
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Outbound FishWatch provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Scheme and host of the provider; `/api/species/{key}` is appended.
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// Outbound request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Forward keys that are not in the catalog (percent-encoded).
    #[serde(default)]
    pub allow_unlisted_species: bool,
}

impl ProviderConfig {
    /// The request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            request_timeout_ms: default_request_timeout_ms(),
            allow_unlisted_species: false,
        }
    }
}

/// Selector view settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewConfig {
    /// Proxy endpoint the HTTP view source posts to.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Timeout for calls to the proxy endpoint, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Hosts images may be loaded from. Empty allows any http(s) host.
    #[serde(default = "default_image_hosts")]
    pub image_hosts: Vec<String>,

    /// Directory holding an `index.html` template that replaces the
    /// built-in page.
    #[serde(default)]
    pub templates_dir: Option<String>,
}

impl ViewConfig {
    /// The endpoint request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            request_timeout_ms: default_request_timeout_ms(),
            image_hosts: default_image_hosts(),
            templates_dir: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

fn default_provider_url() -> String {
    String::from("https://www.fishwatch.gov")
}

const fn default_request_timeout_ms() -> u64 {
    8000
}

fn default_endpoint_url() -> String {
    String::from("http://localhost:3000/api/fish")
}

fn default_image_hosts() -> Vec<String> {
    vec![String::from("origin-east-01-drupal-fishwatch.woc.noaa.gov")]
}

fn default_log_level() -> String {
    String::from("info")
}
