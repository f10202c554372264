//! Editor triggers and response handling
//!
//! Each trigger validates, builds a prompt, and hands it to the worker.
//! `poll_responses` applies whatever the worker has finished since the
//! last tick.

use std::sync::mpsc::TryRecvError;

use super::editor_state::{EditorState, PendingFormat, Suggestion, TriggerError};
use super::loading::OperationKind;
use crate::ai::prompt;
use crate::ai::{AiError, AiResponse, GenerationRequest};

fn failure_message(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Title => "Error generating title",
        OperationKind::Tags => "Error generating tags",
        OperationKind::Suggestion => "Error generating suggestion",
        OperationKind::Format => "Error formatting text",
    }
}

impl EditorState {
    /// Generate a title from the content
    pub fn generate_title(&mut self) -> Result<u64, TriggerError> {
        self.trigger_on_content(OperationKind::Title, prompt::build_title)
    }

    /// Generate tags from the content; success replaces all existing tags
    pub fn generate_tags(&mut self) -> Result<u64, TriggerError> {
        self.trigger_on_content(OperationKind::Tags, prompt::build_tags)
    }

    /// Ask for a continuation of the content
    pub fn generate_suggestion(&mut self) -> Result<u64, TriggerError> {
        self.trigger_on_content(OperationKind::Suggestion, prompt::build_continuation)
    }

    /// Rewrite the selected text according to `instruction`
    ///
    /// On success the first occurrence of the selected text in the content is
    /// replaced, which is not necessarily the occurrence that was selected.
    /// The menu is closed once the attempt is over, whatever the outcome.
    pub fn format_selection(&mut self, instruction: &str) -> Result<u64, TriggerError> {
        let result = self.start_format(instruction);
        match &result {
            Ok(_) => {}
            // The running format closes the menu when it finishes
            Err(TriggerError::InFlight(_)) => {}
            Err(_) => {
                self.selection.release();
            }
        }
        self.report_trigger_error(OperationKind::Format, &result);
        result
    }

    fn start_format(&mut self, instruction: &str) -> Result<u64, TriggerError> {
        self.ensure_idle(OperationKind::Format)?;
        let anchor = self
            .selection
            .anchor()
            .filter(|a| !a.text.is_empty())
            .cloned()
            .ok_or(TriggerError::NoSelection)?;

        let request = prompt::build_format(&anchor.text, instruction);
        let request_id = self.dispatch(OperationKind::Format, request)?;
        self.pending_format = Some(PendingFormat {
            request_id,
            anchor_id: anchor.id,
            selected_text: anchor.text,
        });
        Ok(request_id)
    }

    fn trigger_on_content(
        &mut self,
        kind: OperationKind,
        build: fn(&str) -> GenerationRequest,
    ) -> Result<u64, TriggerError> {
        let result = self.ensure_idle(kind).and_then(|_| {
            if self.note.is_blank() {
                return Err(TriggerError::EmptyContent);
            }
            let request = build(&self.note.content);
            self.dispatch(kind, request)
        });
        self.report_trigger_error(kind, &result);
        result
    }

    fn report_trigger_error(&mut self, kind: OperationKind, result: &Result<u64, TriggerError>) {
        match result {
            Ok(_) => {}
            Err(TriggerError::InFlight(_)) => {
                log::debug!("Ignoring {} trigger, request already in flight", kind);
            }
            Err(err @ (TriggerError::EmptyContent | TriggerError::NoSelection)) => {
                self.notification.warning(err.to_string());
            }
            Err(err @ TriggerError::WorkerUnavailable) => {
                log::error!("Cannot send {} request: {}", kind, err);
                self.notification
                    .error(format!("{}: {}", failure_message(kind), err));
            }
        }
    }

    /// Apply every response the worker has finished
    ///
    /// Returns how many responses were handled. If the worker has gone away,
    /// anything still in flight is failed so no loading flag stays stuck.
    pub fn poll_responses(&mut self) -> usize {
        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(rx) = &self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let handled = responses.len();
        for response in responses {
            self.handle_response(response);
        }

        if disconnected {
            self.on_worker_disconnected();
        }

        handled
    }

    /// Apply one worker response
    ///
    /// A response whose id is not the one in flight for its kind is stale
    /// and dropped without touching any state.
    pub fn handle_response(&mut self, response: AiResponse) {
        let AiResponse {
            kind,
            request_id,
            result,
        } = response;

        if !self.loading.finish(kind, request_id) {
            log::debug!("Discarding stale {} response {}", kind, request_id);
            return;
        }

        match (kind, result) {
            (OperationKind::Format, result) => self.finish_format(request_id, result),
            (_, Err(err)) => self.report_generation_error(kind, &err),
            (OperationKind::Title, Ok(text)) => {
                self.set_title(prompt::parse_title(&text));
                self.notification.success("Title generated successfully");
            }
            (OperationKind::Tags, Ok(text)) => {
                self.note.tags = prompt::parse_tags(&text);
                self.notification.success("Tags generated successfully");
            }
            (OperationKind::Suggestion, Ok(text)) => {
                self.suggestion = Some(Suggestion {
                    text: prompt::parse_continuation(&text),
                });
            }
        }
    }

    fn finish_format(&mut self, request_id: u64, result: Result<String, AiError>) {
        let Some(pending) = self
            .pending_format
            .take_if(|pending| pending.request_id == request_id)
        else {
            log::warn!("Format response {} has no pending selection", request_id);
            return;
        };

        match result {
            Ok(text) => {
                let formatted = prompt::parse_formatted(&text);
                if self.note.content.contains(&pending.selected_text) {
                    // Not a user edit: a pending suggestion survives a shorter rewrite
                    self.note.content = self
                        .note
                        .content
                        .replacen(&pending.selected_text, &formatted, 1);
                    self.notification.success("Text formatted successfully");
                } else {
                    self.notification
                        .warning("Selected text is no longer in the note");
                }
            }
            Err(err) => self.report_generation_error(OperationKind::Format, &err),
        }

        self.selection.release_if(pending.anchor_id);
    }

    fn report_generation_error(&mut self, kind: OperationKind, err: &AiError) {
        log::error!("{} generation failed: {}", kind, err);
        self.notification.error(failure_message(kind));
    }

    fn on_worker_disconnected(&mut self) {
        log::error!("AI worker disconnected");
        self.request_tx = None;
        self.response_rx = None;

        let stuck: Vec<OperationKind> = OperationKind::ALL
            .into_iter()
            .filter(|kind| self.loading.is_loading(*kind))
            .collect();
        for kind in &stuck {
            self.loading.clear(*kind);
        }
        if let Some(pending) = self.pending_format.take() {
            self.selection.release_if(pending.anchor_id);
        }
        if let Some(kind) = stuck.first() {
            self.notification.error(format!(
                "{}: {}",
                failure_message(*kind),
                TriggerError::WorkerUnavailable
            ));
        }
    }
}

#[cfg(test)]
#[path = "editor_events_tests.rs"]
mod editor_events_tests;
