//! Selector view for the FishWatch species viewer.
//!
//! The view owns the species catalog it was given, the current
//! [`SelectionState`], and what should be on screen ([`DisplayState`]).
//! Selecting a species issues a request through a [`FishSource`] and the
//! answer is applied only if it belongs to the latest selection.
//!
//! ```text
//! select(key) --> begin() -> token --> FishSource::fetch --> apply(token, result)
//!                                                            |
//!                               stale token? discard <-------+
//! ```
//!
//! # Modules
//!
//! - [`selector`] -- Selection state machine and request tokens
//! - [`source`] -- [`FishSource`] seam and the HTTP implementation
//! - [`render`] -- HTML page rendering via `minijinja`
//! - [`error`] -- [`ViewError`]

pub mod error;
pub mod render;
pub mod selector;
pub mod source;

pub use error::ViewError;
pub use render::{ImagePolicy, PageRenderer};
pub use selector::{
    ApplyOutcome, DisplayState, FishDisplay, RequestToken, SelectOption, SelectionState,
    SelectorView,
};
pub use source::{FishSource, HttpFishSource};
