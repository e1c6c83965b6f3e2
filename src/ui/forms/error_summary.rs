//! Error summary landmark

use crate::state::forms::{ErrorSummaryEntry, ERROR_SUMMARY_INTRO};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows needed for the summary (borders, heading, one line per entry)
pub fn summary_height(entries: &[ErrorSummaryEntry]) -> u16 {
    if entries.is_empty() {
        0
    } else {
        3 + entries.len() as u16
    }
}

pub fn summary_lines(entries: &[ErrorSummaryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| format!("{}: {}", e.label, e.message))
        .collect()
}

/// Draw the summary. The heading is highlighted while it holds focus.
pub fn draw_error_summary(
    frame: &mut Frame,
    area: Rect,
    entries: &[ErrorSummaryEntry],
    is_focused: bool,
) {
    let heading_style = if is_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(ERROR_SUMMARY_INTRO, heading_style))];
    lines.extend(summary_lines(entries).into_iter().map(Line::from));

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title(" Errors ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(summary, area);
}
