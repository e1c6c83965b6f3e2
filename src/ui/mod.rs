//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area());

    layout::draw_tabs(frame, screen.tabs, app);
    forms::draw_form(frame, screen.form, app);
    layout::draw_live_region(frame, screen.live_region, app);
    layout::draw_status_bar(frame, screen.status_bar, app);

    if let Some(message) = &app.state.success_message {
        components::render_success_dialog(frame, message);
    }
}
