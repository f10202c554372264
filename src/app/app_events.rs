use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use super::app_state::{App, Focus};
use crate::editor::{FORMAT_ACTIONS, OperationKind, TextPosition};

/// How often pending AI results are checked while idle
const TICK_RATE: Duration = Duration::from_millis(50);

impl App {
    /// Main loop: draw, wait briefly for input, apply finished AI work
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    // Only process key press events (avoid duplicates)
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key)
                    }
                    Event::Paste(text) => self.handle_paste_event(text),
                    _ => {}
                }
            }

            self.tick();
        }
        Ok(())
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Ctrl+C / Ctrl+Q: exit application
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        // The format menu is modal while open
        if self.editor.selection.is_active() {
            self.handle_format_menu_key(key);
            return;
        }

        if self.handle_global_keys(key) {
            return;
        }

        match self.focus {
            Focus::Content => self.handle_content_key(key),
            Focus::Title => self.handle_title_key(key),
        }
    }

    /// Handle keys that work regardless of focus
    /// Returns true if key was handled, false otherwise
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('t') if ctrl => {
                let _ = self.editor.generate_title();
                true
            }
            KeyCode::Char('g') if ctrl => {
                let _ = self.editor.generate_tags();
                true
            }
            KeyCode::Char('y') if ctrl => {
                if self.editor.apply_suggestion() {
                    self.sync_from_editor();
                }
                true
            }
            KeyCode::Char('n') if ctrl => {
                self.editor.notification.dismiss();
                true
            }
            // Alt+1..9: remove the Nth tag
            KeyCode::Char(c @ '1'..='9') if alt => {
                let index = c as usize - '1' as usize;
                self.editor.remove_tag(index);
                true
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Content => Focus::Title,
                    Focus::Title => Focus::Content,
                };
                true
            }
            KeyCode::Esc if self.editor.suggestion.is_some() => {
                self.editor.dismiss_suggestion();
                true
            }
            _ => false,
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Shift+Enter asks for a continuation; Alt+Enter for terminals that
        // cannot report Shift with Enter
        if key.code == KeyCode::Enter
            && key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
        {
            let _ = self.editor.generate_suggestion();
            return;
        }

        match key.code {
            KeyCode::Char('f') if ctrl => self.open_format_menu(),
            KeyCode::Esc => self.content.cancel_selection(),
            _ => {
                if self.content.input(key) {
                    self.sync_to_editor();
                }
            }
        }
    }

    fn handle_title_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.focus = Focus::Content,
            _ => {
                if self.title_input.input(key) {
                    self.sync_to_editor();
                }
            }
        }
    }

    /// Capture the widget's selection and open the format menu on it
    fn open_format_menu(&mut self) {
        let captured = match self.content.selection_range() {
            Some((from, to)) => self
                .editor
                .capture_selection(TextPosition::from(from), TextPosition::from(to))
                .is_some(),
            None => {
                self.editor.close_selection_menu();
                false
            }
        };

        if !captured {
            self.editor
                .notification
                .warning("Select some text first (Shift+arrows)");
        }
    }

    fn handle_format_menu_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.editor.close_selection_menu();
            return;
        }

        // Waiting for the rewrite; only Esc does anything
        if self.editor.is_loading(OperationKind::Format) {
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.editor.format_menu.navigate_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.editor.format_menu.navigate_next(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(action) = self.editor.format_menu.select_index(index) {
                    let _ = self.editor.format_selection(action.instruction);
                }
            }
            KeyCode::Enter => {
                let action = self.editor.format_menu.selected_action();
                let _ = self.editor.format_selection(action.instruction);
            }
            _ => {}
        }
    }

    /// Insert pasted text into the focused input
    pub fn handle_paste_event(&mut self, text: String) {
        if self.editor.selection.is_active() {
            return;
        }
        match self.focus {
            Focus::Content => {
                self.content.insert_str(&text);
            }
            Focus::Title => {
                self.title_input.insert_str(text.replace('\n', " "));
            }
        }
        self.sync_to_editor();
    }
}

/// Labels shown in the format menu, numbered for direct selection
pub(crate) fn format_menu_labels() -> Vec<String> {
    FORMAT_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, action)| format!("{}. {}", i + 1, action.label))
        .collect()
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
