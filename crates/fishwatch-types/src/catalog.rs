//! Species catalog entries.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single selectable species.
///
/// `key` is the slug the provider understands (for example `gag-grouper`);
/// `display_name` is what the selection control shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SpeciesCatalogEntry {
    /// Human-readable species name.
    pub display_name: String,
    /// Provider lookup key, unique within a catalog.
    pub key: String,
}

impl SpeciesCatalogEntry {
    /// Create an entry from a display name and key.
    pub fn new(display_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            key: key.into(),
        }
    }
}
