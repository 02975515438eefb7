//! The species catalog.
//!
//! A [`Catalog`] is an ordered, immutable list of [`SpeciesCatalogEntry`]
//! values with unique keys. It is constructed once at startup and shared
//! (usually behind an [`Arc`](std::sync::Arc)) with every component that
//! needs it. Nothing reads it from module state.

use std::collections::BTreeSet;

use fishwatch_types::SpeciesCatalogEntry;

/// The seven species offered by default, in display order.
const FISHWATCH_SPECIES: [(&str, &str); 7] = [
    ("Red Snapper", "red-snapper"),
    ("Pacific Mahimahi", "pacific-mahimahi"),
    ("Atlantic Bigeye Tuna", "atlantic-bigeye-tuna"),
    ("Vermilion Snapper", "vermilion-snapper"),
    ("Gag Grouper", "gag-grouper"),
    ("Arrowtooth Flounder", "arrowtooth-flounder"),
    ("Yellowtail Rockfish", "yellowtail-rockfish"),
];

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two entries share the same key.
    #[error("duplicate species key: {0}")]
    DuplicateKey(String),

    /// An entry has an empty (or whitespace-only) key.
    #[error("species entry {display_name:?} has an empty key")]
    EmptyKey {
        /// Display name of the offending entry.
        display_name: String,
    },
}

/// Ordered list of selectable species with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<SpeciesCatalogEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate keys.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyKey`] or [`CatalogError::DuplicateKey`]
    /// for the first offending entry.
    pub fn new(entries: Vec<SpeciesCatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if entry.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey {
                    display_name: entry.display_name.clone(),
                });
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(CatalogError::DuplicateKey(entry.key.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The default FishWatch catalog.
    pub fn fishwatch() -> Self {
        Self {
            entries: FISHWATCH_SPECIES
                .iter()
                .map(|(name, key)| SpeciesCatalogEntry::new(*name, *key))
                .collect(),
        }
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[SpeciesCatalogEntry] {
        &self.entries
    }

    /// Keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&SpeciesCatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Whether `key` names a catalog entry.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fishwatch()
    }
}
