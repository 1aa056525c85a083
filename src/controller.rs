//! Search controller state machine.
//!
//! [`SearchController`] owns the query string, the current [`UiState`], the
//! item list, and the site metadata. The rendering surface never gets mutable
//! access — it consumes read-only [`Snapshot`]s per render pass.
//!
//! # States
//!
//! ```text
//! idle ──▶ loading ──▶ success ─┐
//!              │                 ├──▶ loading ──▶ ... (re-enterable forever)
//!              └────▶ error  ───┘
//! ```
//!
//! Analyze is two-phase: [`SearchController::begin_analyze`] snapshots the
//! query into an [`Attempt`] and enters `loading`;
//! [`SearchController::finish_analyze`] applies the fetch result. Each
//! attempt carries a monotonically increasing sequence number, and a
//! finishing attempt that is no longer the latest is discarded wholesale —
//! stale responses from an earlier analyze can never overwrite a newer one.
//!
//! Every `FetchError` kind collapses to the same user-visible outcome (empty
//! items, no metadata, `error` state) through one mapping function; the typed
//! kind is logged to stderr for diagnostics.

use serde::Serialize;

use crate::models::{DisplayItem, SiteBundle, SiteMetadata};
use crate::resolver::{FetchError, ManifestSource};

/// Current phase of the controller. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for UiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success => "success",
            UiState::Error => "error",
        };
        f.write_str(s)
    }
}

/// The analyze trigger was pressed with an empty query.
///
/// Blocks the action without any state transition; surfaced to the user as a
/// validation complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyQuery;

impl std::fmt::Display for EmptyQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("please enter a URL")
    }
}

impl std::error::Error for EmptyQuery {}

/// One in-flight analyze attempt.
///
/// Carries the query value captured at trigger time — later input events
/// update only the pending query, never a bound attempt — and the sequence
/// number used for stale-response suppression.
#[derive(Debug, Clone)]
pub struct Attempt {
    seq: u64,
    pub input: String,
}

/// Read-only view of the controller handed to the rendering surface.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub state: UiState,
    pub title: &'a str,
    pub items: &'a [DisplayItem],
    pub metadata: Option<&'a SiteMetadata>,
}

/// Owns the UI state machine and republishes fetch results for rendering.
#[derive(Debug)]
pub struct SearchController {
    query: String,
    state: UiState,
    loading: bool,
    title: String,
    items: Vec<DisplayItem>,
    metadata: Option<SiteMetadata>,
    seq: u64,
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            state: UiState::Idle,
            loading: false,
            title: String::new(),
            items: Vec::new(),
            metadata: None,
            seq: 0,
        }
    }

    /// Input event: unconditionally overwrite the pending query.
    ///
    /// Valid in every state, including while a fetch is in flight; never
    /// triggers network activity.
    pub fn set_query(&mut self, value: &str) {
        self.query = value.to_string();
    }

    /// Analyze trigger, phase one.
    ///
    /// Empty query → [`EmptyQuery`], no transition. Otherwise clears the
    /// previous items/metadata, enters `loading`, and returns the [`Attempt`]
    /// bound to the current query value.
    pub fn begin_analyze(&mut self) -> Result<Attempt, EmptyQuery> {
        if self.query.is_empty() {
            return Err(EmptyQuery);
        }

        self.seq += 1;
        self.loading = true;
        self.state = UiState::Loading;
        self.items.clear();
        self.metadata = None;

        Ok(Attempt {
            seq: self.seq,
            input: self.query.clone(),
        })
    }

    /// Analyze trigger, phase two: apply a fetch result.
    ///
    /// Returns `false` if the attempt is stale (a newer analyze was triggered
    /// while this one was in flight) — stale results are discarded entirely,
    /// including the `loading` flag, which belongs to the newer attempt. For
    /// the current attempt, `loading` is cleared on every path.
    pub fn finish_analyze(
        &mut self,
        attempt: Attempt,
        result: Result<SiteBundle, FetchError>,
    ) -> bool {
        if attempt.seq != self.seq {
            eprintln!("discarding stale manifest response for {}", attempt.input);
            return false;
        }

        self.loading = false;
        match result {
            Ok(bundle) => {
                self.title = bundle.title;
                self.items = bundle.items.into_iter().map(DisplayItem::from).collect();
                self.metadata = Some(bundle.metadata);
                self.state = UiState::Success;
            }
            Err(e) => self.fail(&attempt.input, &e),
        }
        true
    }

    /// Drive a full analyze attempt against a manifest source.
    pub async fn analyze(&mut self, source: &dyn ManifestSource) -> Result<(), EmptyQuery> {
        let attempt = self.begin_analyze()?;
        let result = source.resolve(&attempt.input).await;
        self.finish_analyze(attempt, result);
        Ok(())
    }

    /// Single mapping from any fetch failure to the user-visible error
    /// outcome. The failure kind survives only in the stderr diagnostic.
    fn fail(&mut self, input: &str, err: &FetchError) {
        eprintln!("manifest fetch failed for {}: {}", input, err);
        self.items.clear();
        self.metadata = None;
        self.state = UiState::Error;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn metadata(&self) -> Option<&SiteMetadata> {
        self.metadata.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Read-only snapshot for the rendering surface.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            title: &self.title,
            items: &self.items,
            metadata: self.metadata.as_ref(),
        }
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}
