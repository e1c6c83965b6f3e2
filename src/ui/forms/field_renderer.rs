//! Field rendering

use crate::state::forms::FieldView;
use crate::state::FormVariant;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const INPUT_HEIGHT: u16 = 3;

/// Rows needed to draw a field with its error and instruction lines
pub fn field_height(field: &FieldView, variant: FormVariant) -> u16 {
    let error_row = u16::from(variant.shows_inline_errors() && field.error.is_some());
    let instruction_row = u16::from(field.instruction.is_some());
    INPUT_HEIGHT + error_row + instruction_row
}

/// Text shown inside the input box
pub fn display_value(field: &FieldView) -> String {
    if field.masked {
        "•".repeat(field.value.chars().count())
    } else {
        field.value.clone()
    }
}

/// Box title: the label, with a marker for required fields
pub fn field_title(field: &FieldView) -> String {
    if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    }
}

/// Draw one field: input box, then error and instruction lines
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldView,
    variant: FormVariant,
    is_active: bool,
) {
    let show_error = variant.shows_inline_errors() && field.error.is_some();
    let invalid = variant.uses_aria() && field.aria.invalid;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(u16::from(show_error)),
            Constraint::Length(u16::from(field.instruction.is_some())),
            Constraint::Min(0),
        ])
        .split(area);

    let border_style = match (is_active, invalid) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let cursor = if is_active { "▌" } else { "" };

    let input = Paragraph::new(Line::from(vec![
        Span::raw(display_value(field)),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(field_title(field))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, chunks[0]);

    if let Some(error) = field.error.as_deref().filter(|_| show_error) {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(line, chunks[1]);
    }

    if let Some(instruction) = &field.instruction {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {instruction}"),
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(line, chunks[2]);
    }
}
