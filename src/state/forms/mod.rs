//! Form domain layer
//!
//! The validation and focus engine behind every form variant:
//! - `validators`: pure field rules and their composition
//! - `field` / `registry`: static field descriptors in canonical order
//! - `submission`: values, touched/dirty flags, error map and submit status
//! - `focus_policy` / `scheduler`: where focus goes after a failed submit
//! - `controller`: event entry points and the read-only view
//!
//! The engine API is wider than the terminal front end uses.

#![allow(dead_code)]

mod controller;
mod error;
mod field;
mod focus_policy;
mod handler;
mod registry;
mod scheduler;
mod submission;
mod validators;

pub use controller::{AriaAttributes, FieldView, FormController, FormView, SubmitOutcome};
pub use focus_policy::{
    Announcement, ErrorSummaryEntry, FocusCapability, FocusPlan, FocusPolicyMode, FocusTarget,
    LiveRegionMode, ERROR_SUMMARY_ID, ERROR_SUMMARY_INTRO,
};
pub use handler::{SuccessDispatch, SuccessHandler};
pub use registry::FieldRegistry;
pub use scheduler::FocusScheduler;
pub use submission::{SubmitStatus, SubmittedValues};
pub use validators::Required;
