//! HTTP server for the FishWatch species viewer.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Proxy endpoint** (`POST /api/fish`) that forwards a species key to
//!   the FishWatch API and returns a normalized record
//! - **Catalog endpoint** (`GET /api/species`) listing selectable species
//! - **Selector page** (`GET /`) rendering the selector view server-side,
//!   with `?fish=<key>` selecting a species
//! - **Liveness probe** (`GET /health`)
//!
//! # Architecture
//!
//! Handlers share one immutable [`AppState`]: the catalog, the provider
//! client, and the page renderer. Requests are independent; nothing is
//! cached or mutated across them. The rendered page drives a
//! [`SelectorView`](fishwatch_view::SelectorView) through an in-process
//! source that shares the endpoint's lookup path, so it never calls the
//! server back over HTTP.

pub mod error;
pub mod handlers;
pub mod proxy;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ProxyError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use startup::StartupError;
pub use state::AppState;
