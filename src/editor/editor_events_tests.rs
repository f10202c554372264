//! Tests for editor triggers and response handling

use crate::ai::AiError;
use crate::editor::{OperationKind, Suggestion, TextPosition, TriggerError};
use crate::notification::Severity;
use crate::test_utils::test_helpers::{editor_with_content, respond, take_request, test_editor};
use proptest::prelude::*;

fn network_error() -> AiError {
    AiError::Network("connection reset".to_string())
}

// =========================================================================
// Empty-content guard
// =========================================================================

#[test]
fn test_blank_content_sends_nothing_and_warns_once() {
    for content in ["", "   ", "\n\t"] {
        for kind in [
            OperationKind::Title,
            OperationKind::Tags,
            OperationKind::Suggestion,
        ] {
            let (mut editor, request_rx, _response_tx) = editor_with_content(content);

            let result = match kind {
                OperationKind::Title => editor.generate_title(),
                OperationKind::Tags => editor.generate_tags(),
                _ => editor.generate_suggestion(),
            };

            assert_eq!(result, Err(TriggerError::EmptyContent));
            assert_eq!(request_rx.try_iter().count(), 0, "no request for {}", kind);
            let notification = editor.notification.current().unwrap();
            assert_eq!(notification.severity, Severity::Warning);
            assert_eq!(notification.message, "Please add some content first");
            assert!(!editor.is_loading(kind));
        }
    }
}

// =========================================================================
// Title
// =========================================================================

#[test]
fn test_generate_title_success() {
    let (mut editor, request_rx, response_tx) = editor_with_content("Plans for the weekend");

    editor.generate_title().unwrap();
    assert!(editor.is_loading(OperationKind::Title));

    let request = take_request(&request_rx);
    assert_eq!(request.kind, OperationKind::Title);
    assert!(request.request.prompt.contains("Plans for the weekend"));
    assert_eq!(request.request.options.max_tokens, 30);

    respond(&response_tx, &request, Ok("\"Weekend Plans\"".to_string()));
    assert_eq!(editor.poll_responses(), 1);

    assert_eq!(editor.note.title, "Weekend Plans");
    assert!(!editor.is_loading(OperationKind::Title));
    let notification = editor.notification.current().unwrap();
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.message, "Title generated successfully");
}

#[test]
fn test_generated_title_is_single_line() {
    let (mut editor, request_rx, response_tx) = editor_with_content("Standup notes");

    editor.generate_title().unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Ok("Daily\nStandup\r\nRecap".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.title, "Daily Standup Recap");
}

#[test]
fn test_set_title_flattens_newlines() {
    let (mut editor, _request_rx, _response_tx) = test_editor();

    editor.set_title("two\nlines");

    assert_eq!(editor.note.title, "two lines");
}

#[test]
fn test_generate_title_failure_leaves_state_unchanged() {
    let (mut editor, request_rx, response_tx) = editor_with_content("Some notes");
    editor.note.title = "Old title".to_string();
    editor.note.tags = vec!["keep".to_string()];

    editor.generate_title().unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Err(network_error()));
    editor.poll_responses();

    assert_eq!(editor.note.title, "Old title");
    assert_eq!(editor.note.tags, vec!["keep"]);
    assert_eq!(editor.note.content, "Some notes");
    assert!(!editor.is_loading(OperationKind::Title));
    let notification = editor.notification.current().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Error generating title");
}

#[test]
fn test_duplicate_trigger_while_in_flight_is_ignored() {
    let (mut editor, request_rx, _response_tx) = editor_with_content("Some notes");

    let first = editor.generate_title().unwrap();
    let second = editor.generate_title();

    assert_eq!(second, Err(TriggerError::InFlight(OperationKind::Title)));
    assert_eq!(request_rx.try_iter().count(), 1);
    assert_eq!(
        editor.loading.in_flight_id(OperationKind::Title),
        Some(first)
    );
    assert!(editor.notification.current().is_none());
}

#[test]
fn test_different_kinds_can_run_together() {
    let (mut editor, request_rx, _response_tx) = editor_with_content("Some notes");

    editor.generate_title().unwrap();
    editor.generate_tags().unwrap();
    editor.generate_suggestion().unwrap();

    assert_eq!(request_rx.try_iter().count(), 3);
    assert!(editor.is_loading(OperationKind::Title));
    assert!(editor.is_loading(OperationKind::Tags));
    assert!(editor.is_loading(OperationKind::Suggestion));
}

#[test]
fn test_stale_response_is_discarded() {
    let (mut editor, request_rx, response_tx) = editor_with_content("Some notes");

    editor.generate_title().unwrap();
    let first = take_request(&request_rx);
    respond(&response_tx, &first, Ok("First".to_string()));
    editor.poll_responses();

    editor.generate_title().unwrap();
    let second = take_request(&request_rx);

    // A duplicate delivery of the first response must not touch anything
    respond(&response_tx, &first, Ok("Stale".to_string()));
    editor.poll_responses();
    assert_eq!(editor.note.title, "First");
    assert!(editor.is_loading(OperationKind::Title));

    respond(&response_tx, &second, Ok("Second".to_string()));
    editor.poll_responses();
    assert_eq!(editor.note.title, "Second");
}

// =========================================================================
// Tags
// =========================================================================

#[test]
fn test_generate_tags_replaces_existing_tags() {
    let (mut editor, request_rx, response_tx) = editor_with_content("Rust borrow checker notes");
    editor.note.tags = vec!["old".to_string(), "stale".to_string()];

    editor.generate_tags().unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Ok("rust, ownership, rust".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.tags, vec!["rust", "ownership", "rust"]);
    assert!(!editor.is_loading(OperationKind::Tags));
    assert_eq!(
        editor.notification.current().unwrap().message,
        "Tags generated successfully"
    );
}

#[test]
fn test_generate_tags_failure_keeps_tags() {
    let (mut editor, request_rx, response_tx) = editor_with_content("notes");
    editor.note.tags = vec!["keep".to_string()];

    editor.generate_tags().unwrap();
    let request = take_request(&request_rx);
    respond(
        &response_tx,
        &request,
        Err(AiError::Api {
            code: 500,
            message: "oops".to_string(),
        }),
    );
    editor.poll_responses();

    assert_eq!(editor.note.tags, vec!["keep"]);
    assert!(!editor.is_loading(OperationKind::Tags));
    assert_eq!(
        editor.notification.current().unwrap().message,
        "Error generating tags"
    );
}

#[test]
fn test_remove_tag_is_local() {
    let (mut editor, request_rx, _response_tx) = test_editor();
    editor.note.tags = vec!["a".into(), "b".into(), "c".into()];

    assert_eq!(editor.remove_tag(1), Some("b".to_string()));
    assert_eq!(editor.note.tags, vec!["a", "c"]);
    assert_eq!(request_rx.try_iter().count(), 0);
}

// =========================================================================
// Suggestions
// =========================================================================

#[test]
fn test_generate_suggestion_stores_pending_suggestion() {
    let (mut editor, request_rx, response_tx) = editor_with_content("The meeting started");

    editor.generate_suggestion().unwrap();
    let request = take_request(&request_rx);
    assert_eq!(request.request.options.max_tokens, 50);
    respond(&response_tx, &request, Ok("late because of traffic.".to_string()));
    editor.poll_responses();

    assert_eq!(
        editor.suggestion,
        Some(Suggestion {
            text: "late because of traffic.".to_string()
        })
    );
    assert!(!editor.is_loading(OperationKind::Suggestion));
    // Suggestions are shown inline, not announced
    assert!(editor.notification.current().is_none());
}

#[test]
fn test_suggestion_failure_shows_error() {
    let (mut editor, request_rx, response_tx) = editor_with_content("Hello");

    editor.generate_suggestion().unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Err(AiError::Parse("bad".to_string())));
    editor.poll_responses();

    assert!(editor.suggestion.is_none());
    assert!(!editor.is_loading(OperationKind::Suggestion));
    assert_eq!(
        editor.notification.current().unwrap().message,
        "Error generating suggestion"
    );
}

#[test]
fn test_apply_suggestion_single_space() {
    let (mut editor, _request_rx, _response_tx) = editor_with_content("Hello ");
    editor.suggestion = Some(Suggestion {
        text: " world".to_string(),
    });

    assert!(editor.apply_suggestion());
    assert_eq!(editor.note.content, "Hello world");
    assert!(editor.suggestion.is_none());
}

#[test]
fn test_apply_without_suggestion_is_noop() {
    let (mut editor, _request_rx, _response_tx) = editor_with_content("Hello");
    assert!(!editor.apply_suggestion());
    assert_eq!(editor.note.content, "Hello");
}

#[test]
fn test_dismiss_suggestion() {
    let (mut editor, _request_rx, _response_tx) = editor_with_content("Hello");
    editor.suggestion = Some(Suggestion {
        text: "world".to_string(),
    });

    editor.dismiss_suggestion();
    assert!(editor.suggestion.is_none());
    assert_eq!(editor.note.content, "Hello");
}

#[test]
fn test_deletion_clears_suggestion() {
    let (mut editor, _request_rx, _response_tx) = editor_with_content("Hello there");
    editor.suggestion = Some(Suggestion {
        text: "friend".to_string(),
    });

    editor.set_content("Hello ther");
    assert!(editor.suggestion.is_none());
}

#[test]
fn test_typing_keeps_suggestion() {
    let (mut editor, _request_rx, _response_tx) = editor_with_content("Hello");
    editor.suggestion = Some(Suggestion {
        text: "world".to_string(),
    });

    editor.set_content("Hello!");
    assert!(editor.suggestion.is_some());
}

// =========================================================================
// Formatting
// =========================================================================

fn select(editor: &mut crate::editor::EditorState, from: usize, to: usize) {
    editor
        .capture_selection(TextPosition::new(0, from), TextPosition::new(0, to))
        .expect("selection should be captured");
}

#[test]
fn test_format_replaces_first_occurrence_only() {
    let (mut editor, request_rx, response_tx) = editor_with_content("foo bar foo");
    // Select the second "foo"
    select(&mut editor, 8, 11);

    editor.format_selection("Make this uppercase").unwrap();
    let request = take_request(&request_rx);
    assert_eq!(request.kind, OperationKind::Format);
    assert!(request.request.prompt.ends_with("\"foo\""));
    assert!(request.request.options.system_message.is_some());

    respond(&response_tx, &request, Ok("FOO".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.content, "FOO bar foo");
    assert!(!editor.selection.is_active());
    assert!(!editor.is_loading(OperationKind::Format));
    assert_eq!(
        editor.notification.current().unwrap().message,
        "Text formatted successfully"
    );
}

#[test]
fn test_format_strips_quotes_from_result() {
    let (mut editor, request_rx, response_tx) = editor_with_content("im going home now");
    select(&mut editor, 0, 13);

    editor
        .format_selection("Fix any grammar issues in this text")
        .unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Ok("\"I'm going home\"".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.content, "I'm going home now");
}

#[test]
fn test_shorter_format_result_keeps_pending_suggestion() {
    let (mut editor, request_rx, response_tx) = editor_with_content("hello wonderful world");
    editor.suggestion = Some(Suggestion {
        text: "and beyond".to_string(),
    });
    select(&mut editor, 6, 15);

    editor.format_selection("Make this more concise").unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Ok("nice".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.content, "hello nice world");
    assert_eq!(
        editor.suggestion,
        Some(Suggestion {
            text: "and beyond".to_string()
        })
    );
}

#[test]
fn test_format_failure_closes_menu_and_keeps_content() {
    let (mut editor, request_rx, response_tx) = editor_with_content("foo bar");
    select(&mut editor, 0, 3);

    editor.format_selection("Rephrase this text").unwrap();
    let request = take_request(&request_rx);
    respond(&response_tx, &request, Err(network_error()));
    editor.poll_responses();

    assert_eq!(editor.note.content, "foo bar");
    assert!(!editor.selection.is_active());
    assert!(!editor.is_loading(OperationKind::Format));
    let notification = editor.notification.current().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Error formatting text");
}

#[test]
fn test_format_without_selection_warns() {
    let (mut editor, request_rx, _response_tx) = editor_with_content("foo bar");

    let result = editor.format_selection("Rephrase this text");

    assert_eq!(result, Err(TriggerError::NoSelection));
    assert_eq!(request_rx.try_iter().count(), 0);
    assert_eq!(
        editor.notification.current().unwrap().severity,
        Severity::Warning
    );
}

#[test]
fn test_format_when_text_vanished_warns() {
    let (mut editor, request_rx, response_tx) = editor_with_content("foo bar");
    select(&mut editor, 0, 3);

    editor.format_selection("Rephrase this text").unwrap();
    let request = take_request(&request_rx);
    editor.set_content("bar");
    respond(&response_tx, &request, Ok("FOO".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.content, "bar");
    assert_eq!(
        editor.notification.current().unwrap().severity,
        Severity::Warning
    );
    assert!(!editor.selection.is_active());
}

#[test]
fn test_late_format_result_keeps_newer_menu_open() {
    let (mut editor, request_rx, response_tx) = editor_with_content("foo bar");
    select(&mut editor, 0, 3);
    editor.format_selection("Rephrase this text").unwrap();
    let request = take_request(&request_rx);

    // User closes the menu and selects something else before the result lands
    editor.close_selection_menu();
    select(&mut editor, 4, 7);

    respond(&response_tx, &request, Ok("FOO".to_string()));
    editor.poll_responses();

    assert_eq!(editor.note.content, "FOO bar");
    assert_eq!(editor.selection.anchor().unwrap().text, "bar");
}

#[test]
fn test_empty_selection_closes_menu() {
    let (mut editor, _request_rx, _response_tx) = editor_with_content("foo bar");
    select(&mut editor, 0, 3);

    let anchor = editor.capture_selection(TextPosition::new(0, 2), TextPosition::new(0, 2));
    assert!(anchor.is_none());
    assert!(!editor.selection.is_active());
}

// =========================================================================
// Worker availability
// =========================================================================

#[test]
fn test_trigger_without_worker_reports_error() {
    let mut editor = crate::editor::EditorState::default();
    editor.set_content("notes");

    let result = editor.generate_title();

    assert_eq!(result, Err(TriggerError::WorkerUnavailable));
    assert!(!editor.is_loading(OperationKind::Title));
    assert_eq!(
        editor.notification.current().unwrap().severity,
        Severity::Error
    );
}

#[test]
fn test_worker_disconnect_clears_loading() {
    let (mut editor, request_rx, response_tx) = editor_with_content("notes");
    editor.generate_tags().unwrap();

    drop(response_tx);
    drop(request_rx);
    editor.poll_responses();

    assert!(!editor.is_loading(OperationKind::Tags));
    assert_eq!(
        editor.notification.current().unwrap().severity,
        Severity::Error
    );
    assert_eq!(editor.generate_tags(), Err(TriggerError::WorkerUnavailable));
}

// =========================================================================
// Property-Based Tests
// =========================================================================

// Applying a suggestion always joins with exactly one space
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_apply_suggestion_single_separator(
        content in "[a-zA-Z.]{1,20}",
        trailing in " {0,4}",
        suggestion in "[a-zA-Z.]{1,20}",
        leading in " {0,4}",
    ) {
        let (mut editor, _request_rx, _response_tx) =
            editor_with_content(&format!("{}{}", content, trailing));
        editor.suggestion = Some(Suggestion { text: format!("{}{}", leading, suggestion) });

        prop_assert!(editor.apply_suggestion());
        prop_assert_eq!(editor.note.content, format!("{} {}", content, suggestion));
    }

    #[test]
    fn prop_shrinking_edit_clears_suggestion(content in "[a-z ]{2,30}", cut in 1usize..30) {
        let (mut editor, _request_rx, _response_tx) = editor_with_content(&content);
        editor.suggestion = Some(Suggestion { text: "more".to_string() });

        let keep = content.len().saturating_sub(cut);
        editor.set_content(&content[..keep]);
        prop_assert!(editor.suggestion.is_none());
    }

    #[test]
    fn prop_failed_generation_never_changes_note(
        content in "[a-z]{1,20}",
        title in "[a-z]{0,10}",
        kind_index in 0usize..3,
    ) {
        let (mut editor, request_rx, response_tx) = editor_with_content(&content);
        editor.note.title = title.clone();
        let before = editor.note.clone();

        let _ = match kind_index {
            0 => editor.generate_title(),
            1 => editor.generate_tags(),
            _ => editor.generate_suggestion(),
        };
        let request = take_request(&request_rx);
        respond(&response_tx, &request, Err(network_error()));
        editor.poll_responses();

        prop_assert_eq!(&editor.note, &before);
        prop_assert!(!editor.loading.any_loading());
        prop_assert_eq!(editor.notification.current().unwrap().severity, Severity::Error);
    }
}
