//! Layout components (variant tabs, live region, status bar)

use super::forms::screen_reader_reading;
use crate::app::App;
use crate::state::forms::{LiveRegionMode, SubmitStatus};
use crate::state::FormVariant;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Areas of the screen
pub struct ScreenLayout {
    pub tabs: Rect,
    pub form: Rect,
    pub live_region: Rect,
    pub status_bar: Rect,
}

/// Split the screen into tabs, form, live region and status bar
pub fn create_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Variant tabs
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Live region
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenLayout {
        tabs: chunks[0],
        form: chunks[1],
        live_region: chunks[2],
        status_bar: chunks[3],
    }
}

/// Draw the variant switcher
pub fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = FormVariant::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!("F{} {}", i + 1, v.tab_label())))
        .collect::<Vec<_>>();
    let selected = FormVariant::ALL
        .iter()
        .position(|v| *v == app.state.variant)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .title(" A11y Forms Example ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Draw what assistive technology would currently speak
pub fn draw_live_region(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    if let Some(announcement) = &app.state.announcement {
        let color = match announcement.politeness {
            LiveRegionMode::Assertive => Color::Red,
            LiveRegionMode::Polite => Color::Yellow,
            LiveRegionMode::Off => Color::DarkGray,
        };
        lines.push(Line::from(vec![
            Span::styled("announce: ", Style::default().fg(color)),
            Span::raw(announcement.message.clone()),
        ]));
    }

    if let Some(reading) = screen_reader_reading(&app.state, &app.controller.view()) {
        lines.push(Line::from(vec![
            Span::styled("focus: ", Style::default().fg(Color::Cyan)),
            Span::raw(reading),
        ]));
    }

    let region = Paragraph::new(lines).block(
        Block::default()
            .title(" Screen reader ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(region, area);
}

fn status_color(status: SubmitStatus) -> Color {
    match status {
        SubmitStatus::Idle => Color::Gray,
        SubmitStatus::Submitting => Color::Yellow,
        SubmitStatus::Succeeded => Color::Green,
        SubmitStatus::Failed => Color::Red,
    }
}

/// Key hints, with the skip shortcut only where the variant offers it
fn hints(offers_skip: bool) -> &'static str {
    if offers_skip {
        " Tab:next  ^S/Enter:submit  ^E:first error  F1-F3:variant"
    } else {
        " Tab:next  ^S/Enter:submit  F1-F3:variant"
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = app.controller.submit_status();
    let mut spans = vec![Span::styled(
        format!(" {} ", status.label()),
        Style::default().fg(Color::Black).bg(status_color(status)),
    )];

    spans.push(Span::styled(
        hints(app.controller.mode().offers_skip_link()),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(bar, area);

    let quit_hint = " Esc:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
