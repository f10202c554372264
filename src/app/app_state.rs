use ratatui::{layout::Rect, style::Style};
use tui_textarea::{CursorMove, TextArea};

use crate::editor::EditorState;

const CONTENT_PLACEHOLDER: &str = "Start typing your note... (Shift+Enter for suggestions)";
const TITLE_PLACEHOLDER: &str = "Title (Ctrl+T to generate)";

/// Which input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Title,
}

/// Application state
pub struct App {
    pub editor: EditorState,
    pub content: TextArea<'static>,
    pub title_input: TextArea<'static>,
    pub focus: Focus,
    pub should_quit: bool,
    /// First visible content row, tracked the same way the widget scrolls
    pub(crate) content_scroll_top: u16,
    /// Inner area of the content box from the last render
    pub(crate) content_area: Rect,
}

fn content_textarea(text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(text.split('\n').map(String::from).collect());
    textarea.set_placeholder_text(CONTENT_PLACEHOLDER);
    // Remove default underline from cursor line
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(CursorMove::Bottom);
    textarea.move_cursor(CursorMove::End);
    textarea
}

fn title_textarea(text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![text.replace('\n', " ")]);
    textarea.set_placeholder_text(TITLE_PLACEHOLDER);
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(CursorMove::End);
    textarea
}

impl App {
    pub fn new(editor: EditorState) -> Self {
        let content = content_textarea(&editor.note.content);
        let title_input = title_textarea(&editor.note.title);
        Self {
            editor,
            content,
            title_input,
            focus: Focus::Content,
            should_quit: false,
            content_scroll_top: 0,
            content_area: Rect::default(),
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The content as shown in the widget
    pub fn content_text(&self) -> String {
        self.content.lines().join("\n")
    }

    pub fn title_text(&self) -> String {
        self.title_input.lines().join(" ")
    }

    /// Push widget edits into the editor
    pub(crate) fn sync_to_editor(&mut self) {
        let content = self.content_text();
        if content != self.editor.note.content {
            self.editor.set_content(content);
        }
        let title = self.title_text();
        if title != self.editor.note.title {
            self.editor.set_title(title);
        }
    }

    /// Rebuild the widgets after the editor changed the note itself
    /// (applied suggestion, formatted text, generated title)
    pub(crate) fn sync_from_editor(&mut self) {
        if self.content_text() != self.editor.note.content {
            self.content = content_textarea(&self.editor.note.content);
        }
        if self.title_text() != self.editor.note.title {
            self.title_input = title_textarea(&self.editor.note.title);
        }
    }

    /// Apply finished AI work and expire old notifications
    pub fn tick(&mut self) {
        if self.editor.poll_responses() > 0 {
            self.sync_from_editor();
        }
        self.editor.notification.clear_expired();
    }
}
