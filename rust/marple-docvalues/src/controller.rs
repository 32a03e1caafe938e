//! Load triggers and sequencing of doc-values fetches.
//!
//! Every state change that requires fresh doc values maps to a [`Trigger`]. The
//! inspector turns a trigger into a [`PendingLoad`] tagged with a sequence
//! number, and applies the backend's answer once it resolves. Fetches are never
//! cancelled or de-duplicated; the [`LoadController`] only decides whether a
//! resolved fetch is still allowed to update the state.

use log::debug;

use crate::config::ResponseOrdering;
use crate::filter::DocFilterExpression;
use crate::model::{FieldSelection, IndexData, LoadRequest};

/// What the containing view supplies to the inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectorProps {
    /// The inspected field; nothing is loaded or rendered without one.
    pub selection: Option<FieldSelection>,
    pub index: IndexData,
}

/// A state change that requires a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A field became available for the first time.
    Mount,
    /// The segment, field or index changed. The encoding is re-derived from the
    /// persisted preference, ignoring the one currently displayed.
    SelectionChanged,
    /// The operator picked another encoding.
    EncodingRequested(String),
    /// The operator edited the doc filter.
    FilterEdited(DocFilterExpression),
}

/// Trigger table for props updates: diffs `previous` against `next`.
pub fn props_trigger(previous: Option<&InspectorProps>, next: &InspectorProps) -> Option<Trigger> {
    next.selection.as_ref()?;
    match previous {
        Some(previous) if previous.selection.is_some() => {
            (previous != next).then_some(Trigger::SelectionChanged)
        }
        _ => Some(Trigger::Mount),
    }
}

/// Why a fetch was issued, which decides how its answer is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPurpose {
    /// Mount or selection change; the answer replaces values and encoding.
    Selection,
    /// Encoding negotiation for `candidate`.
    Encoding { candidate: String },
    /// Filter edit; `filter` is committed together with the answer.
    Filter { filter: DocFilterExpression },
}

/// A fetch that was issued and whose answer has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    seq: u64,
    pub purpose: LoadPurpose,
    pub request: LoadRequest,
    /// Index the request was issued against; preferences are scoped by it.
    pub index_path: String,
}

impl PendingLoad {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues sequence numbers and applies the configured [`ResponseOrdering`].
#[derive(Debug, Clone)]
pub struct LoadController {
    ordering: ResponseOrdering,
    next_seq: u64,
    last_applied: Option<u64>,
}

impl LoadController {
    pub fn new(ordering: ResponseOrdering) -> LoadController {
        LoadController {
            ordering,
            next_seq: 0,
            last_applied: None,
        }
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub fn issue(
        &mut self,
        purpose: LoadPurpose,
        request: LoadRequest,
        index_path: String,
    ) -> PendingLoad {
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(
            "issuing doc values load #{seq} for {}/{} (filter '{}', encoding '{}')",
            request.segment, request.field, request.filter, request.encoding
        );
        PendingLoad {
            seq,
            purpose,
            request,
            index_path,
        }
    }

    /// Whether the answer to `load` may be applied now. Admitted loads are
    /// recorded as applied.
    pub fn admit(&mut self, load: &PendingLoad) -> bool {
        let stale = self.last_applied.is_some_and(|last| load.seq < last);
        if stale && self.ordering == ResponseOrdering::LatestRequest {
            debug!(
                "discarding doc values load #{}, #{} was already applied",
                load.seq,
                self.last_applied.unwrap_or_default()
            );
            return false;
        }
        if stale {
            debug!("applying doc values load #{} out of request order", load.seq);
        }
        self.last_applied = Some(self.last_applied.map_or(load.seq, |last| last.max(load.seq)));
        true
    }
}
