use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::app_events::format_menu_labels;
use super::app_state::{App, Focus};
use crate::editor::{OperationKind, TextPosition};
use crate::notification::render_notification;
use crate::widgets::popup;

const SUGGESTION_HEIGHT: u16 = 5;
const MENU_WIDTH: u16 = 24;

const HELP_TEXT: &str = " Shift/Alt+Enter suggest | Ctrl+T title | Ctrl+G tags | Ctrl+F format | Tab focus | Ctrl+Q quit";

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn block_title(label: &str, loading: bool) -> String {
    if loading {
        format!(" {} (generating...) ", label)
    } else {
        format!(" {} ", label)
    }
}

/// Keep the cursor row visible the same way the textarea widget scrolls
pub(crate) fn next_scroll_top(prev_top: u16, cursor_row: u16, height: u16) -> u16 {
    if cursor_row < prev_top {
        cursor_row
    } else if height > 0 && prev_top + height <= cursor_row {
        cursor_row + 1 - height
    } else {
        prev_top
    }
}

/// Screen cell of a text position inside the content box
///
/// Returns None when the position is scrolled out of view.
pub(crate) fn anchor_cell(
    content: &[String],
    pos: TextPosition,
    area: Rect,
    scroll_top: u16,
) -> Option<Position> {
    let row = u16::try_from(pos.row).ok()?;
    if row < scroll_top || row - scroll_top >= area.height {
        return None;
    }

    let line = content.get(pos.row)?;
    let prefix: String = line.chars().take(pos.col).collect();
    let x_offset = u16::try_from(prefix.width()).unwrap_or(u16::MAX);
    let max_x = area.x + area.width.saturating_sub(1);

    Some(Position {
        x: area.x.saturating_add(x_offset).min(max_x),
        y: area.y + (row - scroll_top),
    })
}

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let suggestion_height = if self.editor.suggestion.is_some() {
            SUGGESTION_HEIGHT
        } else {
            0
        };

        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(suggestion_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_title(frame, layout[0]);
        self.render_tags(frame, layout[1]);
        self.render_content(frame, layout[2]);
        if self.editor.suggestion.is_some() {
            self.render_suggestion(frame, layout[3]);
        }
        render_help_line(frame, layout[4]);

        if self.editor.selection.is_active() {
            self.render_format_menu(frame, layout[2]);
        }

        render_notification(frame, &self.editor.notification);
    }

    fn render_title(&mut self, frame: &mut Frame, area: Rect) {
        let loading = self.editor.is_loading(OperationKind::Title);
        self.title_input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(block_title("Title", loading))
                .border_style(border_style(self.focus == Focus::Title)),
        );
        frame.render_widget(&self.title_input, area);
    }

    fn render_tags(&self, frame: &mut Frame, area: Rect) {
        let loading = self.editor.is_loading(OperationKind::Tags);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(block_title("Tags", loading))
            .border_style(border_style(false));

        let line = if self.editor.note.tags.is_empty() {
            Line::from(Span::styled(
                "No tags (Ctrl+G to generate, Alt+N to remove)",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let mut spans = Vec::new();
            for (i, tag) in self.editor.note.tags.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    format!("[{}] {}", i + 1, tag),
                    Style::default().fg(Color::Black).bg(Color::Blue),
                ));
            }
            Line::from(spans)
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let label = if self.editor.is_loading(OperationKind::Format) {
            " Note (formatting...) ".to_string()
        } else {
            block_title("Note", self.editor.is_loading(OperationKind::Suggestion))
        };

        self.content.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(border_style(self.focus == Focus::Content)),
        );
        frame.render_widget(&self.content, area);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let cursor_row = u16::try_from(self.content.cursor().0).unwrap_or(u16::MAX);
        self.content_scroll_top = next_scroll_top(self.content_scroll_top, cursor_row, inner.height);
        self.content_area = inner;
    }

    fn render_suggestion(&self, frame: &mut Frame, area: Rect) {
        let Some(suggestion) = &self.editor.suggestion else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Suggestion (Ctrl+Y apply, Esc dismiss) ")
            .border_style(Style::default().fg(Color::Magenta));

        let paragraph = Paragraph::new(suggestion.text.as_str())
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )
            .block(block)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }

    fn render_format_menu(&self, frame: &mut Frame, content_area: Rect) {
        let Some(anchor) = self.editor.selection.anchor() else {
            return;
        };

        let labels = format_menu_labels();
        let height = labels.len() as u16 + 2;
        let cell = anchor_cell(
            self.content.lines(),
            anchor.end_position,
            self.content_area,
            self.content_scroll_top,
        )
        .unwrap_or(Position {
            x: self.content_area.x,
            y: self.content_area.y,
        });

        let area = popup::popup_at_anchor(cell, MENU_WIDTH, height, content_area);
        popup::clear_area(frame, area);

        let formatting = self.editor.is_loading(OperationKind::Format);
        let selected = self.editor.format_menu.selected_index();
        let lines: Vec<Line> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let style = if formatting {
                    Style::default().fg(Color::DarkGray)
                } else if i == selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!(" {} ", label), style))
            })
            .collect();

        let title = if formatting { " Formatting... " } else { " Format " };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Yellow));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn render_help_line(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
