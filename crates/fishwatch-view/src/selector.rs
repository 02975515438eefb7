//! Selection state machine.
//!
//! ```text
//!            select(key)                 apply(latest, record)
//!   Idle ---------------> Loading(key) -----------------------> Loaded
//!     ^                      |     \   apply(latest, error)
//!     |       clear()        |      +-----------------------> Error
//!     +----------------------+
//! ```
//!
//! Every call to [`SelectorView::begin`] issues a fresh [`RequestToken`].
//! [`SelectorView::apply`] accepts a result only for the most recent token,
//! so a slow answer to an earlier selection can never overwrite a newer one.

use std::sync::Arc;

use fishwatch_core::catalog::Catalog;
use fishwatch_core::markup::strip_tags;
use fishwatch_types::{FishRecord, FishResponse};
use serde::Serialize;
use tracing::debug;

use crate::error::{UNREACHABLE_MESSAGE, ViewError};
use crate::source::FishSource;

/// Placeholder shown before anything is selected.
pub const IDLE_MESSAGE: &str = "No data yet. Select a fish from the dropdown.";

/// Identifies one issued request. Tokens increase monotonically per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw counter value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// What happened to a result handed to [`SelectorView::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The result belonged to the latest request and is now displayed.
    Applied,
    /// A newer request was issued since; the result was dropped.
    Stale,
}

/// Client-side selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Currently selected key; empty means nothing is selected.
    pub selected_key: String,
    /// Last record that was successfully fetched and applied.
    pub record: Option<FishRecord>,
    /// Token of the most recently issued request.
    pub latest_token: Option<RequestToken>,
}

/// A record prepared for display: markup stripped from the text fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FishDisplay {
    /// Card title.
    pub title: String,
    /// Image URL, if the record has one.
    pub image: Option<String>,
    /// Health benefits with tags removed.
    pub health_benefits: String,
    /// Physical description with tags removed.
    pub physical_description: String,
}

impl FishDisplay {
    /// Prepare a record for display.
    pub fn from_record(record: &FishRecord) -> Self {
        Self {
            title: record.species_name.clone(),
            image: record.image.clone(),
            health_benefits: strip_tags(&record.health_benefits).into_owned(),
            physical_description: strip_tags(&record.physical_description).into_owned(),
        }
    }
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    /// Nothing selected yet.
    Idle,
    /// Waiting for the endpoint.
    Loading {
        /// Key being fetched.
        key: String,
    },
    /// A record is on screen.
    Loaded(FishDisplay),
    /// The endpoint failed or returned an error payload.
    Error {
        /// Key the failure belongs to.
        key: String,
        /// Message to show.
        message: String,
    },
}

impl DisplayState {
    /// Short state name, matching the serialized `state` tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Loaded(_) => "loaded",
            Self::Error { .. } => "error",
        }
    }
}

/// One `<option>` of the selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Option value (species key).
    pub key: String,
    /// Option label (display name).
    pub label: String,
    /// Whether this option is the current selection.
    pub selected: bool,
}

/// The selector view: catalog, selection, and display state.
#[derive(Debug, Clone)]
pub struct SelectorView {
    catalog: Arc<Catalog>,
    selection: SelectionState,
    display: DisplayState,
    issued: u64,
}

impl SelectorView {
    /// Create an idle view over `catalog`.
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selection: SelectionState {
                selected_key: String::new(),
                record: None,
                latest_token: None,
            },
            display: DisplayState::Idle,
            issued: 0,
        }
    }

    /// The catalog this view offers.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current selection state.
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current display state.
    pub const fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Options for the selection control, in catalog order.
    pub fn options(&self) -> Vec<SelectOption> {
        self.catalog
            .entries()
            .iter()
            .map(|entry| SelectOption {
                key: entry.key.clone(),
                label: entry.display_name.clone(),
                selected: entry.key == self.selection.selected_key,
            })
            .collect()
    }

    /// Record a new selection and issue a token for its request.
    ///
    /// The key is not checked against the catalog; the endpoint decides.
    pub fn begin(&mut self, key: &str) -> RequestToken {
        self.issued = self.issued.wrapping_add(1);
        let token = RequestToken(self.issued);

        key.clone_into(&mut self.selection.selected_key);
        self.selection.latest_token = Some(token);
        self.display = DisplayState::Loading {
            key: key.to_owned(),
        };

        debug!(species = key, token = token.value(), "selection started");
        token
    }

    /// Apply the result of the request identified by `token`.
    ///
    /// Results for anything but the latest token are discarded. An error
    /// payload or a failed call moves the view to [`DisplayState::Error`]
    /// and leaves the last good record in place.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<FishResponse, ViewError>,
    ) -> ApplyOutcome {
        if self.selection.latest_token != Some(token) {
            debug!(
                token = token.value(),
                latest = ?self.selection.latest_token.map(RequestToken::value),
                "discarding stale response"
            );
            return ApplyOutcome::Stale;
        }

        let key = self.selection.selected_key.clone();
        self.display = match result {
            Ok(FishResponse::Record(record)) => {
                let display = FishDisplay::from_record(&record);
                self.selection.record = Some(record);
                DisplayState::Loaded(display)
            }
            Ok(FishResponse::Error(payload)) => DisplayState::Error {
                key,
                message: payload.error,
            },
            Err(e) => {
                tracing::warn!(species = %key, error = %e, "fish request failed");
                DisplayState::Error {
                    key,
                    message: UNREACHABLE_MESSAGE.to_owned(),
                }
            }
        };
        ApplyOutcome::Applied
    }

    /// Select `key` and wait for its result.
    ///
    /// An empty key clears the selection instead of fetching.
    pub async fn select<S: FishSource>(&mut self, source: &S, key: &str) -> ApplyOutcome {
        if key.is_empty() {
            self.clear();
            return ApplyOutcome::Applied;
        }
        let token = self.begin(key);
        let result = source.fetch(key).await;
        self.apply(token, result)
    }

    /// Return to idle. Any in-flight request becomes stale.
    pub fn clear(&mut self) {
        self.issued = self.issued.wrapping_add(1);
        self.selection.selected_key.clear();
        self.selection.latest_token = Some(RequestToken(self.issued));
        self.display = DisplayState::Idle;
    }
}
