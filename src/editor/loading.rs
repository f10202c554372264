//! Per-operation loading state
//!
//! Each operation kind is independently Idle or InFlight. InFlight is
//! represented by the id of the outstanding request, so a late response
//! for an older id can be recognized and dropped.

use std::fmt;

/// The kinds of asynchronous work the editor can have outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Title,
    Tags,
    Suggestion,
    Format,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Title,
        OperationKind::Tags,
        OperationKind::Suggestion,
        OperationKind::Format,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Title => "title",
            OperationKind::Tags => "tags",
            OperationKind::Suggestion => "suggestion",
            OperationKind::Format => "format",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingState {
    title: Option<u64>,
    tags: Option<u64>,
    suggestion: Option<u64>,
    format: Option<u64>,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: OperationKind) -> &Option<u64> {
        match kind {
            OperationKind::Title => &self.title,
            OperationKind::Tags => &self.tags,
            OperationKind::Suggestion => &self.suggestion,
            OperationKind::Format => &self.format,
        }
    }

    fn slot_mut(&mut self, kind: OperationKind) -> &mut Option<u64> {
        match kind {
            OperationKind::Title => &mut self.title,
            OperationKind::Tags => &mut self.tags,
            OperationKind::Suggestion => &mut self.suggestion,
            OperationKind::Format => &mut self.format,
        }
    }

    /// Whether a request of this kind is outstanding
    pub fn is_loading(&self, kind: OperationKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn in_flight_id(&self, kind: OperationKind) -> Option<u64> {
        *self.slot(kind)
    }

    pub fn any_loading(&self) -> bool {
        OperationKind::ALL.iter().any(|kind| self.is_loading(*kind))
    }

    /// Mark `kind` as InFlight with `request_id`
    pub fn start(&mut self, kind: OperationKind, request_id: u64) {
        *self.slot_mut(kind) = Some(request_id);
    }

    /// Return `kind` to Idle if `request_id` is the one in flight
    ///
    /// Returns false (and changes nothing) for a stale or unknown id.
    pub fn finish(&mut self, kind: OperationKind, request_id: u64) -> bool {
        let slot = self.slot_mut(kind);
        if *slot == Some(request_id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Return `kind` to Idle regardless of which request was in flight
    pub fn clear(&mut self, kind: OperationKind) {
        *self.slot_mut(kind) = None;
    }
}
