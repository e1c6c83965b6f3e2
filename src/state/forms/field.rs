//! Field descriptors and per-field runtime flags

use super::validators::{NotForbidden, Required, Validator};

/// Autocomplete category announced to assistive technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteHint {
    GivenName,
    FamilyName,
    Email,
    Username,
    NewPassword,
    CurrentPassword,
    Off,
}

impl AutocompleteHint {
    /// HTML autocomplete token
    pub fn token(&self) -> &'static str {
        match self {
            Self::GivenName => "given-name",
            Self::FamilyName => "family-name",
            Self::Email => "email",
            Self::Username => "username",
            Self::NewPassword => "new-password",
            Self::CurrentPassword => "current-password",
            Self::Off => "off",
        }
    }
}

/// Static description of a single form field
#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub validator: Validator,
    pub required: bool,
    pub instruction: Option<String>,
    pub autocomplete: Option<AutocompleteHint>,
    /// Render the value as bullets
    pub masked: bool,
}

impl FieldDescriptor {
    /// Create an optional text field with no validation
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            validator: Validator::none(),
            required: false,
            instruction: None,
            autocomplete: None,
            masked: false,
        }
    }

    /// Create a required text field using the given required message
    pub fn required_text(name: &str, label: &str, required_message: &str) -> Self {
        Self {
            validator: Validator::none().with(Required::with_message(required_message)),
            required: true,
            ..Self::text(name, label)
        }
    }

    /// Append a rejected value to this field's validator
    pub fn forbid(mut self, forbidden: &str, message: &str) -> Self {
        self.validator = self.validator.with(NotForbidden::new(forbidden, message));
        self
    }

    pub fn with_instruction(mut self, instruction: &str) -> Self {
        self.instruction = Some(instruction.to_string());
        self
    }

    pub fn with_autocomplete(mut self, hint: AutocompleteHint) -> Self {
        self.autocomplete = Some(hint);
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Stable id of the rendered input, used for focus lookup
    pub fn input_id(&self) -> String {
        format!("form-field-{}", self.name)
    }

    pub fn error_id(&self) -> String {
        format!("form-field-error-{}", self.name)
    }

    pub fn instruction_id(&self) -> Option<String> {
        self.instruction
            .as_ref()
            .map(|_| format!("form-field-instruction-{}", self.name))
    }

    /// Run this field's validator
    pub fn validate(&self, value: Option<&str>) -> Option<String> {
        self.validator.validate(value)
    }
}

/// Runtime flags tracked for each field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field has lost focus at least once
    pub touched: bool,
    /// Value changed after the most recent submit attempt began
    pub dirty_since_last_submit: bool,
    /// Error entry reflects the current value (cleared on edit)
    pub validated_since_edit: bool,
}
