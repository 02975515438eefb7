//! Outbound client for the public FishWatch API.
//!
//! The provider answers `GET /api/species/{key}` with a JSON array of
//! loosely-shaped records whose fields use display names (`"Species Name"`,
//! `"Image Gallery"`, ...). This crate fetches that payload and normalizes
//! it into a [`FishRecord`](fishwatch_types::FishRecord).
//!
//! ```text
//! key --> FishWatchClient --GET--> provider --> ProviderPayload --> FishRecord
//! ```
//!
//! Every call is a single attempt with an explicit timeout. There are no
//! retries and no caching.

pub mod client;
pub mod error;
pub mod payload;

pub use client::FishWatchClient;
pub use error::ProviderError;
pub use payload::{ImageGallery, ProviderImage, ProviderPayload, ProviderSpecies};
