//! Submission state machine
//!
//! Owns field values and per-field flags, the current error map and the
//! submission status. All transitions are synchronous; nothing here knows
//! about focus or rendering.

use std::collections::HashMap;

use super::error::FormError;
use super::field::FieldMeta;
use super::registry::FieldRegistry;

/// Lifecycle of the most recent submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Identifies one submit attempt. Increases by one per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AttemptId(pub u64);

impl AttemptId {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Field name to error message. An absent entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: HashMap<String, String>,
}

impl ErrorMap {
    /// Store or clear the entry for a field. Empty messages clear it.
    pub fn set(&mut self, name: &str, message: Option<String>) {
        match message.filter(|m| !m.is_empty()) {
            Some(message) => {
                self.entries.insert(name.to_string(), message);
            }
            None => {
                self.entries.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries as `(name, message)` in registry order
    pub fn in_registry_order<'a>(
        &'a self,
        registry: &'a FieldRegistry,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        registry
            .iter()
            .filter_map(|f| self.get(&f.name).map(|m| (f.name.as_str(), m)))
    }
}

/// Values handed to the success handler, in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedValues(pub Vec<(String, String)>);

impl SubmittedValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Per-form state owned exclusively by the submission machine
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    values: HashMap<String, String>,
    metas: HashMap<String, FieldMeta>,
    errors: ErrorMap,
    status: SubmitStatus,
    attempt: AttemptId,
}

impl SubmissionState {
    /// Mount: every registered field starts empty and untouched
    pub fn new(registry: &FieldRegistry) -> Self {
        let mut state = Self::default();
        for field in registry.iter() {
            state.values.insert(field.name.clone(), String::new());
            state.metas.insert(field.name.clone(), FieldMeta::default());
        }
        state
    }

    /// Remount that keeps numbering attempts after `previous`, so plans
    /// scheduled before the remount never match a later attempt
    pub fn remount(registry: &FieldRegistry, previous: AttemptId) -> Self {
        Self {
            attempt: previous,
            ..Self::new(registry)
        }
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Id of the latest submit attempt (`AttemptId(0)` before the first one)
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn meta(&self, name: &str) -> Option<FieldMeta> {
        self.metas.get(name).copied()
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.metas.get(name).is_some_and(|m| m.touched)
    }

    /// Record a new value for a field
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let meta = self
            .metas
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        let current = self.values.entry(name.to_string()).or_default();
        if current.as_str() == value {
            return Ok(());
        }
        value.clone_into(current);

        meta.validated_since_edit = false;
        if self.status != SubmitStatus::Idle {
            meta.dirty_since_last_submit = true;
        }
        Ok(())
    }

    /// Mark a field touched and revalidate it against its current value
    pub fn blur(&mut self, registry: &FieldRegistry, name: &str) -> Result<(), FormError> {
        let descriptor = registry.lookup(name)?;
        let meta = self
            .metas
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        meta.touched = true;
        meta.validated_since_edit = true;
        let message = descriptor.validate(self.values.get(name).map(String::as_str));
        self.errors.set(name, message);
        tracing::debug!(field = name, invalid = self.errors.contains(name), "field blurred");
        Ok(())
    }

    /// Start a submit attempt: status becomes `Submitting`, dirty flags reset
    /// and every field is revalidated against the current snapshot.
    ///
    /// Returns the id of the new attempt.
    pub fn begin_submit(&mut self, registry: &FieldRegistry) -> AttemptId {
        self.attempt = self.attempt.next();
        self.status = SubmitStatus::Submitting;

        for meta in self.metas.values_mut() {
            meta.dirty_since_last_submit = false;
            meta.validated_since_edit = true;
        }

        let mut errors = ErrorMap::default();
        for field in registry.iter() {
            errors.set(&field.name, field.validate(self.value(&field.name)));
        }
        self.errors = errors;

        tracing::debug!(
            attempt = self.attempt.0,
            errors = self.errors.len(),
            "submit attempt started"
        );
        self.attempt
    }

    /// Move to `Failed` if the error map is non-empty, otherwise stay in
    /// `Submitting` awaiting [`mark_succeeded`](Self::mark_succeeded).
    ///
    /// Returns true if the attempt failed.
    pub fn settle_validation(&mut self) -> bool {
        if self.errors.is_empty() {
            false
        } else {
            self.status = SubmitStatus::Failed;
            true
        }
    }

    /// Finish a valid attempt. Ignored if a newer attempt has started.
    pub fn mark_succeeded(&mut self, attempt: AttemptId) {
        if attempt == self.attempt
            && self.status == SubmitStatus::Submitting
            && self.errors.is_empty()
        {
            self.status = SubmitStatus::Succeeded;
        }
    }

    /// Snapshot of all values in registry order
    pub fn snapshot(&self, registry: &FieldRegistry) -> SubmittedValues {
        SubmittedValues(
            registry
                .iter()
                .map(|f| {
                    (
                        f.name.clone(),
                        self.value(&f.name).unwrap_or_default().to_string(),
                    )
                })
                .collect(),
        )
    }

    /// Whether the error for a field should be presented right now.
    ///
    /// Shown after the field was visited and left with its current content,
    /// or when it was part of the last failed submission and has not been
    /// edited since.
    pub fn is_error_displayed(&self, name: &str) -> bool {
        if !self.errors.contains(name) {
            return false;
        }
        let Some(meta) = self.metas.get(name) else {
            return false;
        };
        let live = meta.touched && meta.validated_since_edit;
        let from_submit = self.status == SubmitStatus::Failed && !meta.dirty_since_last_submit;
        live || from_submit
    }

    pub fn displayed_error(&self, name: &str) -> Option<&str> {
        if self.is_error_displayed(name) {
            self.errors.get(name)
        } else {
            None
        }
    }

    /// Submit control reports itself disabled after a failure until any edit
    pub fn submit_aria_disabled(&self) -> bool {
        self.status == SubmitStatus::Failed
            && self.metas.values().all(|m| !m.dirty_since_last_submit)
    }
}
