//! Focus and announcement policy
//!
//! Decides where keyboard focus goes after a failed submit attempt and what,
//! if anything, is announced to screen readers. The decision is pure; moving
//! focus is delegated to an injected [`FocusCapability`].

use serde::{Deserialize, Serialize};

use super::error::FormError;
use super::registry::FieldRegistry;
use super::submission::{AttemptId, ErrorMap};

/// Landmark id of the error summary heading
pub const ERROR_SUMMARY_ID: &str = "error-summary-intro";

/// Heading text of the error summary
pub const ERROR_SUMMARY_INTRO: &str = "There are errors to address:";

/// How focus is handled after a failed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusPolicyMode {
    /// Focus the first field in error, in registry order
    #[default]
    FirstInvalidField,
    /// Focus the error summary landmark, which is also announced assertively
    ErrorSummaryLandmark,
    /// Leave focus alone; the user tabs to discover errors
    Manual,
}

impl FocusPolicyMode {
    /// Whether the "skip to first error" affordance is offered
    pub fn offers_skip_link(&self) -> bool {
        !matches!(self, Self::Manual)
    }
}

/// Element that should receive focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Field(String),
    Landmark(String),
    None,
}

impl FocusTarget {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Field(name) | Self::Landmark(name) => Some(name),
            Self::None => None,
        }
    }
}

/// Politeness of a live region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRegionMode {
    Off,
    Polite,
    Assertive,
}

/// Text to be read out by assistive technology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub region_id: String,
    pub politeness: LiveRegionMode,
    pub message: String,
}

/// One line of the error summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSummaryEntry {
    pub field: String,
    pub label: String,
    pub message: String,
}

/// Build the error summary in registry order
pub fn error_summary(registry: &FieldRegistry, errors: &ErrorMap) -> Vec<ErrorSummaryEntry> {
    errors
        .in_registry_order(registry)
        .filter_map(|(name, message)| {
            let label = registry.label_for(name)?;
            Some(ErrorSummaryEntry {
                field: name.to_string(),
                label: label.to_string(),
                message: message.to_string(),
            })
        })
        .collect()
}

/// Side effects computed for one failed submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusPlan {
    pub attempt: AttemptId,
    pub target: FocusTarget,
    pub announcement: Option<Announcement>,
}

/// Compute the focus plan for a failed attempt.
///
/// Returns `None` when there is nothing to do: no errors, or manual mode.
pub fn plan_focus(
    mode: FocusPolicyMode,
    registry: &FieldRegistry,
    errors: &ErrorMap,
    attempt: AttemptId,
) -> Option<FocusPlan> {
    if errors.is_empty() {
        return None;
    }

    match mode {
        FocusPolicyMode::Manual => None,
        FocusPolicyMode::FirstInvalidField => {
            let (first, _) = errors.in_registry_order(registry).next()?;
            Some(FocusPlan {
                attempt,
                target: FocusTarget::Field(first.to_string()),
                announcement: None,
            })
        }
        FocusPolicyMode::ErrorSummaryLandmark => {
            let summary = error_summary(registry, errors);
            let details = summary
                .iter()
                .map(|e| format!("{}: {}", e.label, e.message))
                .collect::<Vec<_>>()
                .join(". ");
            Some(FocusPlan {
                attempt,
                target: FocusTarget::Landmark(ERROR_SUMMARY_ID.to_string()),
                announcement: Some(Announcement {
                    region_id: ERROR_SUMMARY_ID.to_string(),
                    politeness: LiveRegionMode::Assertive,
                    message: format!("{ERROR_SUMMARY_INTRO} {details}"),
                }),
            })
        }
    }
}

/// Capability to move input focus and speak to assistive technology
#[cfg_attr(test, mockall::automock)]
pub trait FocusCapability {
    /// Move focus to the target. Returns false if no such element exists.
    fn focus(&mut self, target: &FocusTarget) -> bool;

    /// Present an announcement through a live region
    fn announce(&mut self, announcement: &Announcement);
}

/// Carry out a plan through the capability
pub fn apply_plan(plan: &FocusPlan, capability: &mut dyn FocusCapability) -> Result<(), FormError> {
    if let Some(announcement) = &plan.announcement {
        capability.announce(announcement);
    }

    match plan.target.id() {
        Some(id) if !capability.focus(&plan.target) => {
            Err(FormError::FocusTargetNotFound(id.to_string()))
        }
        _ => Ok(()),
    }
}
