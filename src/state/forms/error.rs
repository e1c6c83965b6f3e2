//! Engine configuration errors
//!
//! None of these ever reach the user. The controller logs them and skips the
//! affected side effect.

/// Non-fatal configuration error raised inside the form engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no field named `{0}` in the registry")]
    UnknownField(String),

    #[error("focus target `{0}` could not be found")]
    FocusTargetNotFound(String),
}
