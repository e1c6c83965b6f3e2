//! Field validators
//!
//! Every rule is a pure function of a single field value. Rules are composed
//! into a [`Validator`] which reports the first failing rule, left to right.

use std::fmt;

/// Returns true if the value counts as "not filled in"
pub fn is_empty_value(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// A single validation rule
pub trait ValidationRule: Send + Sync {
    /// Returns an error message if the value fails this rule
    fn validate(&self, value: Option<&str>) -> Option<String>;

    /// Short name used in logs
    fn description(&self) -> &str;
}

/// Fails on empty values
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Required {
    pub const DEFAULT_MESSAGE: &'static str = "Required";

    pub fn new() -> Self {
        Self::with_message(Self::DEFAULT_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for Required {
    fn validate(&self, value: Option<&str>) -> Option<String> {
        if is_empty_value(value) {
            Some(self.message.clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        "required"
    }
}

/// Rejects one specific value, ignoring case and surrounding whitespace
#[derive(Debug, Clone)]
pub struct NotForbidden {
    forbidden: String,
    message: String,
}

impl NotForbidden {
    pub fn new(forbidden: &str, message: impl Into<String>) -> Self {
        Self {
            forbidden: forbidden.trim().to_lowercase(),
            message: message.into(),
        }
    }
}

impl ValidationRule for NotForbidden {
    fn validate(&self, value: Option<&str>) -> Option<String> {
        let value = value?;
        if value.trim().is_empty() {
            return None;
        }
        if value.trim().to_lowercase() == self.forbidden {
            Some(self.message.clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        "not-forbidden"
    }
}

/// Ordered, short-circuiting composition of rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// A validator that accepts everything
    pub fn none() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self::default().with(Required::new())
    }

    /// Append a rule, evaluated after all previous ones
    pub fn with(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// First non-empty message from the rules, or `None` if the value passes
    pub fn validate(&self, value: Option<&str>) -> Option<String> {
        self.rules
            .iter()
            .filter_map(|rule| rule.validate(value))
            .find(|message| !message.is_empty())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.description()))
            .finish()
    }
}
