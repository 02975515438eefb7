//! Shared building blocks for the FishWatch species viewer.
//!
//! # Modules
//!
//! - [`catalog`] -- The immutable list of selectable species, built once at
//!   startup and passed to the endpoint and the view.
//! - [`config`] -- Configuration loading from `fishwatch-config.yaml` into
//!   strongly-typed structs.
//! - [`markup`] -- Tag stripping applied to provider text before display.

pub mod catalog;
pub mod config;
pub mod markup;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, FishwatchConfig};
pub use markup::strip_tags;
