//! Form page: summary, fields and submit button for the active variant

use super::error_summary::{draw_error_summary, summary_height};
use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::forms::SubmitStatus;
use crate::state::FocusSlot;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the form for the current variant
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let variant = app.state.variant;
    let view = app.controller.view();

    let block = Block::default()
        .title(format!(" {} ", variant.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let summary_entries = if variant.shows_summary() && view.status == SubmitStatus::Failed {
        view.error_summary.as_slice()
    } else {
        &[]
    };

    let mut constraints = vec![Constraint::Length(summary_height(summary_entries))];
    constraints.extend(
        view.fields
            .iter()
            .map(|f| Constraint::Length(field_height(f, variant))),
    );
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    if !summary_entries.is_empty() {
        draw_error_summary(
            frame,
            chunks[0],
            summary_entries,
            app.state.focus == FocusSlot::Summary,
        );
    }

    for (index, field) in view.fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[index + 1],
            field,
            variant,
            app.state.focus == FocusSlot::Field(index),
        );
    }

    let submit_area = chunks[view.fields.len() + 1];
    render_button(
        frame,
        Rect {
            width: submit_area.width.min(32),
            ..submit_area
        },
        "Submit",
        app.state.focus == FocusSlot::Submit,
        variant.uses_aria() && view.submit_aria_disabled,
    );
}
