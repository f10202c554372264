//! Editor orchestrator state
//!
//! Owns the note, the pending suggestion, per-kind loading state, the
//! notification, and the selection anchor, plus the channel handles for
//! talking to the AI worker. Everything here is mutated on the UI thread
//! only.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use thiserror::Error;

use super::format_menu::FormatMenuState;
use super::loading::{LoadingState, OperationKind};
use super::note::Note;
use super::selection::{SelectionAnchor, SelectionTracker, TextPosition};
use crate::ai::{AiRequest, AiResponse, GenerationRequest};
use crate::notification::NotificationState;

/// Why a trigger did not send a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("Please add some content first")]
    EmptyContent,

    #[error("Select some text first")]
    NoSelection,

    #[error("A {0} request is already in progress")]
    InFlight(OperationKind),

    #[error("AI worker is not running")]
    WorkerUnavailable,
}

/// A generated continuation waiting to be applied or dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
}

/// A format request remembers what it was asked to replace
#[derive(Debug, Clone)]
pub(super) struct PendingFormat {
    pub(super) request_id: u64,
    pub(super) anchor_id: u64,
    pub(super) selected_text: String,
}

pub struct EditorState {
    pub note: Note,
    /// At most one pending continuation
    pub suggestion: Option<Suggestion>,
    pub loading: LoadingState,
    pub notification: NotificationState,
    pub selection: SelectionTracker,
    pub format_menu: FormatMenuState,
    pub(super) request_tx: Option<Sender<AiRequest>>,
    pub(super) response_rx: Option<Receiver<AiResponse>>,
    /// Last issued request id; every request gets a fresh one
    pub(super) request_id: u64,
    pub(super) pending_format: Option<PendingFormat>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(NotificationState::default())
    }
}

impl EditorState {
    pub fn new(notification: NotificationState) -> Self {
        Self {
            note: Note::new(),
            suggestion: None,
            loading: LoadingState::new(),
            notification,
            selection: SelectionTracker::new(),
            format_menu: FormatMenuState::new(),
            request_tx: None,
            response_rx: None,
            request_id: 0,
            pending_format: None,
        }
    }

    pub fn with_notification_timeout(timeout: Duration) -> Self {
        Self::new(NotificationState::new(timeout))
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(&mut self, request_tx: Sender<AiRequest>, response_rx: Receiver<AiResponse>) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Replace the content with the user's edit
    ///
    /// A shrinking edit (deletion) drops the pending suggestion: the user is
    /// no longer continuing the text the suggestion was generated for. This
    /// looks at length only, not at where the caret is.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if self.suggestion.is_some() && content.chars().count() < self.note.content.chars().count()
        {
            log::debug!("Content shrank, clearing suggestion");
            self.suggestion = None;
        }
        self.note.content = content;
    }

    /// Titles are a single line; line breaks become spaces
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.note.title = title.into().replace("\r\n", " ").replace('\n', " ");
    }

    /// Append the pending suggestion to the content with a single space
    ///
    /// Returns false when there is nothing to apply.
    pub fn apply_suggestion(&mut self) -> bool {
        let Some(suggestion) = self.suggestion.take() else {
            return false;
        };
        self.note.content = format!(
            "{} {}",
            self.note.content.trim_end(),
            suggestion.text.trim_start()
        );
        true
    }

    pub fn dismiss_suggestion(&mut self) {
        self.suggestion = None;
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        self.note.remove_tag(index)
    }

    /// Capture the current selection and open the format menu on it
    ///
    /// Returns `None` (menu closed) for an empty selection.
    pub fn capture_selection(
        &mut self,
        from: TextPosition,
        to: TextPosition,
    ) -> Option<&SelectionAnchor> {
        self.format_menu.reset();
        self.selection.capture(&self.note.content, from, to)
    }

    pub fn close_selection_menu(&mut self) {
        self.selection.release();
    }

    pub fn is_loading(&self, kind: OperationKind) -> bool {
        self.loading.is_loading(kind)
    }

    pub(super) fn ensure_idle(&self, kind: OperationKind) -> Result<(), TriggerError> {
        if self.loading.is_loading(kind) {
            Err(TriggerError::InFlight(kind))
        } else {
            Ok(())
        }
    }

    /// Hand a request to the worker and mark its kind InFlight
    pub(super) fn dispatch(
        &mut self,
        kind: OperationKind,
        request: GenerationRequest,
    ) -> Result<u64, TriggerError> {
        self.ensure_idle(kind)?;
        let tx = self
            .request_tx
            .as_ref()
            .ok_or(TriggerError::WorkerUnavailable)?;

        let request_id = self.request_id.wrapping_add(1);
        tx.send(AiRequest {
            kind,
            request_id,
            request,
        })
        .map_err(|_| TriggerError::WorkerUnavailable)?;

        self.request_id = request_id;
        self.loading.start(kind, request_id);
        log::debug!("Sent {} request {}", kind, request_id);
        Ok(request_id)
    }
}
