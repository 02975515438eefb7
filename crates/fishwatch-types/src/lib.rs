//! Shared type definitions for the FishWatch species viewer.
//!
//! This crate is the single source of truth for the JSON shapes exchanged
//! between the selector view and the proxy endpoint. Types flow downstream
//! to `TypeScript` via `ts-rs` so a browser client can share them.
//!
//! # Modules
//!
//! - [`catalog`] -- Selectable species entries
//! - [`fish`] -- Proxy request, normalized record, and error payload

pub mod catalog;
pub mod fish;

// Re-export all public types at crate root for convenience.
pub use catalog::SpeciesCatalogEntry;
pub use fish::{
    ErrorPayload, FishRecord, FishRequest, FishResponse, MALFORMED_REQUEST_MESSAGE,
    NO_DATA_MESSAGE, PROVIDER_FAILURE_MESSAGE, UNKNOWN_SPECIES_MESSAGE,
};
