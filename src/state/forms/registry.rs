//! Ordered registry of form fields

use super::error::FormError;
use super::field::{AutocompleteHint, FieldDescriptor};

/// Static, ordered table of field descriptors.
///
/// Registry order is the canonical order for error summaries and focus
/// decisions, independent of the order in which errors were produced.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// The three-field sign-up form shipped with the binary
    pub fn signup(required_message: &str) -> Self {
        Self::new(vec![
            FieldDescriptor::required_text("firstName", "First Name", required_message)
                .with_autocomplete(AutocompleteHint::GivenName),
            FieldDescriptor::required_text("lastName", "Last Name", required_message)
                .with_autocomplete(AutocompleteHint::FamilyName),
            FieldDescriptor::required_text("password", "Password", required_message)
                .forbid("ferrari", "I said no \"ferrari\"")
                .with_instruction("Enter anything except \"ferrari\"")
                .with_autocomplete(AutocompleteHint::NewPassword)
                .masked(),
        ])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Like [`get`](Self::get) but reports a missing field as a configuration error
    pub fn lookup(&self, name: &str) -> Result<&FieldDescriptor, FormError> {
        self.get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn by_index(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn label_for(&self, name: &str) -> Option<&str> {
        self.get(name).map(|f| f.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_order() {
        let registry = FieldRegistry::signup("Required");
        let names: Vec<_> = registry.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["firstName", "lastName", "password"]);
    }

    #[test]
    fn test_signup_password_rules() {
        let registry = FieldRegistry::signup("Required");
        let password = registry.get("password").unwrap();
        assert!(password.required);
        assert!(password.masked);
        assert_eq!(
            password.instruction.as_deref(),
            Some("Enter anything except \"ferrari\"")
        );
        assert_eq!(
            password.validate(Some(" Ferrari ")).as_deref(),
            Some("I said no \"ferrari\"")
        );
    }

    #[test]
    fn test_every_signup_field_requires_a_value() {
        let registry = FieldRegistry::signup("Required");
        for field in registry.iter() {
            assert_eq!(field.validate(None).as_deref(), Some("Required"));
            assert_eq!(field.validate(Some("")).as_deref(), Some("Required"));
        }
    }

    #[test]
    fn test_lookup_unknown_field() {
        let registry = FieldRegistry::signup("Required");
        assert_eq!(
            registry.lookup("email").unwrap_err(),
            FormError::UnknownField("email".to_string())
        );
    }

    #[test]
    fn test_position_and_label() {
        let registry = FieldRegistry::signup("Required");
        assert_eq!(registry.position("lastName"), Some(1));
        assert_eq!(registry.label_for("lastName"), Some("Last Name"));
        assert!(registry.label_for("missing").is_none());
        assert_eq!(registry.by_index(2).map(|f| f.name.as_str()), Some("password"));
        assert!(registry.by_index(3).is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = FieldRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains("firstName"));
    }
}
