//! Screen reader simulation
//!
//! Builds the phrase assistive technology would read for the focused element,
//! from the ARIA wiring the engine exposes.

use crate::state::forms::{FieldView, FormView, ERROR_SUMMARY_INTRO};
use crate::state::{AppState, FocusSlot};

fn read_field(field: &FieldView, uses_aria: bool) -> String {
    let role = if field.masked {
        "secure edit text"
    } else {
        "edit text"
    };
    if !uses_aria {
        return role.to_string();
    }

    let mut parts = vec![field.label.clone(), role.to_string()];
    if field.aria.required {
        parts.push("required".to_string());
    }
    if field.aria.invalid {
        parts.push("invalid entry".to_string());
    }
    // describedby order: error, then instruction
    if let Some(error) = field.error.as_ref().filter(|_| field.aria.error_id.is_some()) {
        parts.push(error.clone());
    }
    if let Some(instruction) = field
        .instruction
        .as_ref()
        .filter(|_| field.aria.instruction_id.is_some())
    {
        parts.push(instruction.clone());
    }
    parts.join(", ")
}

/// Phrase read for the currently focused element
pub fn screen_reader_reading(state: &AppState, view: &FormView) -> Option<String> {
    let uses_aria = state.variant.uses_aria();
    match state.focus {
        FocusSlot::Field(index) => view.fields.get(index).map(|f| read_field(f, uses_aria)),
        FocusSlot::Submit if uses_aria && view.submit_aria_disabled => {
            Some("Submit, button, dimmed".to_string())
        }
        FocusSlot::Submit => Some("Submit, button".to_string()),
        FocusSlot::Summary => {
            let entries = view
                .error_summary
                .iter()
                .map(|e| format!("{}: {}", e.label, e.message))
                .collect::<Vec<_>>()
                .join(". ");
            Some(format!("{ERROR_SUMMARY_INTRO} {entries}"))
        }
    }
}
