//! Application state definitions

use super::forms::{Announcement, FocusCapability, FocusPolicyMode, FocusTarget, ERROR_SUMMARY_ID};
use serde::{Deserialize, Serialize};

/// Presentation variant wrapped around the form engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormVariant {
    /// Inline errors after a field is left, focus jumps to the first error
    #[default]
    Live,
    /// Error summary after a failed submit, focus jumps to the summary
    Submit,
    /// No labels, no ARIA, no focus management
    NoA11y,
}

impl FormVariant {
    pub const ALL: [FormVariant; 3] = [Self::Live, Self::Submit, Self::NoA11y];

    pub fn policy_mode(&self) -> FocusPolicyMode {
        match self {
            Self::Live => FocusPolicyMode::FirstInvalidField,
            Self::Submit => FocusPolicyMode::ErrorSummaryLandmark,
            Self::NoA11y => FocusPolicyMode::Manual,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Live => "Forms with live validation",
            Self::Submit => "Forms with submit validation",
            Self::NoA11y => "Form with poor a11y",
        }
    }

    /// Short name for the variant switcher
    pub fn tab_label(&self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Submit => "Submit",
            Self::NoA11y => "No a11y",
        }
    }

    /// Error text rendered under each field
    pub fn shows_inline_errors(&self) -> bool {
        !matches!(self, Self::Submit)
    }

    /// Error summary rendered above the fields after a failed submit
    pub fn shows_summary(&self) -> bool {
        matches!(self, Self::Submit)
    }

    /// Labels, required markers and ARIA hints are presented
    pub fn uses_aria(&self) -> bool {
        !matches!(self, Self::NoA11y)
    }
}

/// Element holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusSlot {
    #[default]
    Submit,
    Field(usize),
    /// Error summary heading; reachable only programmatically
    Summary,
}

impl FocusSlot {
    /// Next slot in tab order: fields, then the submit button
    pub fn next(self, field_count: usize) -> Self {
        match self {
            Self::Field(i) if i + 1 < field_count => Self::Field(i + 1),
            Self::Field(_) => Self::Submit,
            Self::Submit | Self::Summary if field_count > 0 => Self::Field(0),
            Self::Submit | Self::Summary => Self::Submit,
        }
    }

    pub fn prev(self, field_count: usize) -> Self {
        match self {
            Self::Field(0) | Self::Summary => Self::Submit,
            Self::Field(i) => Self::Field(i - 1),
            Self::Submit if field_count > 0 => Self::Field(field_count - 1),
            Self::Submit => Self::Submit,
        }
    }

    pub fn field_index(self) -> Option<usize> {
        match self {
            Self::Field(i) => Some(i),
            _ => None,
        }
    }
}

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub variant: FormVariant,
    pub focus: FocusSlot,
    /// Field names in render order, used to resolve focus targets
    pub field_order: Vec<String>,
    /// Last live-region announcement
    pub announcement: Option<Announcement>,
    /// Success confirmation dialog text
    pub success_message: Option<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(variant: FormVariant, field_order: Vec<String>) -> Self {
        let focus = if field_order.is_empty() {
            FocusSlot::Submit
        } else {
            FocusSlot::Field(0)
        };
        Self {
            variant,
            focus,
            field_order,
            ..Default::default()
        }
    }

    /// Name of the focused field, if focus is on a field
    pub fn focused_field(&self) -> Option<&str> {
        self.focus
            .field_index()
            .and_then(|i| self.field_order.get(i))
            .map(String::as_str)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_order.iter().position(|n| n == name)
    }
}

/// Focus capability backed by the application state
pub struct AppFocus<'a> {
    state: &'a mut AppState,
    summary_visible: bool,
}

impl<'a> AppFocus<'a> {
    pub fn new(state: &'a mut AppState, summary_visible: bool) -> Self {
        Self {
            state,
            summary_visible,
        }
    }
}

impl FocusCapability for AppFocus<'_> {
    fn focus(&mut self, target: &FocusTarget) -> bool {
        let slot = match target {
            FocusTarget::Field(name) => self.state.field_index(name).map(FocusSlot::Field),
            FocusTarget::Landmark(id) if id == ERROR_SUMMARY_ID && self.summary_visible => {
                Some(FocusSlot::Summary)
            }
            FocusTarget::Landmark(_) | FocusTarget::None => None,
        };

        match slot {
            Some(slot) => {
                self.state.focus = slot;
                true
            }
            None => false,
        }
    }

    fn announce(&mut self, announcement: &Announcement) {
        if self.state.variant.uses_aria() {
            self.state.announcement = Some(announcement.clone());
        }
    }
}
