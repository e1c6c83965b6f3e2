//! Button component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button.
///
/// A button that is only disabled for assistive purposes stays operable; it is
/// drawn dimmed and carries a marker so the reason can be read out.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    aria_disabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut text_style = if aria_disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    if is_selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let label = button_label(content, aria_disabled);
    let paragraph = Paragraph::new(format!(" {label} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

fn button_label(content: &str, aria_disabled: bool) -> String {
    if aria_disabled {
        format!("{content} (fix errors first)")
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_plain() {
        assert_eq!(button_label("Submit", false), "Submit");
    }

    #[test]
    fn test_label_aria_disabled() {
        assert_eq!(button_label("Submit", true), "Submit (fix errors first)");
    }
}
