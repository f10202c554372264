use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::state::{NotificationState, Severity};
use crate::widgets::popup;

const MAX_WIDTH: u16 = 60;

fn severity_style(severity: Severity) -> (Color, &'static str) {
    match severity {
        Severity::Success => (Color::Green, " Success "),
        Severity::Warning => (Color::Yellow, " Warning "),
        Severity::Error => (Color::Red, " Error "),
    }
}

/// Render the current notification in the bottom-right corner
pub fn render_notification(frame: &mut Frame, state: &NotificationState) {
    let Some(notification) = state.current() else {
        return;
    };

    let (color, title) = severity_style(notification.severity);
    let text_width = notification.message.width() as u16;
    let width = (text_width + 4).clamp(title.len() as u16 + 4, MAX_WIDTH);
    let inner_width = width.saturating_sub(4).max(1);
    let lines = text_width.div_ceil(inner_width).max(1);

    let area = popup::bottom_right_popup(frame.area(), width, lines + 2);
    popup::clear_area(frame, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Line::from(format!(" {}", notification.message)))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
