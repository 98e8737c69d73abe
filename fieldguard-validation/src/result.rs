// Validation results

use crate::ConstraintKind;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A failed constraint on a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Constraint that failed
    pub constraint: ConstraintKind,

    /// Resolved message
    pub message: String,
}

/// Failed constraints per field.
///
/// Fields appear in registration order, and only when at least one of their
/// constraints failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    fields: IndexMap<String, Vec<Violation>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field
    pub fn add(&mut self, field: &str, constraint: ConstraintKind, message: String) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(Violation {
                constraint,
                message,
            });
    }

    /// True when no field failed
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failed fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn has_errors(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Violations for a field, in constraint order
    pub fn get(&self, field: &str) -> Option<&[Violation]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Messages for a field, in constraint order
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.fields
            .get(field)
            .map(|violations| violations.iter().map(|v| v.message.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Violation])> {
        self.fields
            .iter()
            .map(|(field, violations)| (field.as_str(), violations.as_slice()))
    }

    /// Plain field -> messages map
    pub fn into_messages(self) -> IndexMap<String, Vec<String>> {
        self.fields
            .into_iter()
            .map(|(field, violations)| {
                let messages = violations.into_iter().map(|v| v.message).collect();
                (field, messages)
            })
            .collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        let errors: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(field, violations)| {
                let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
                (field.clone(), serde_json::json!(messages))
            })
            .collect();

        serde_json::json!({
            "valid": self.is_valid(),
            "errors": errors,
        })
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, violations) in &self.fields {
            for violation in violations {
                writeln!(f, "{}: {}", field, violation.message)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationResult {
        let mut result = ValidationResult::new();
        result.add("login", ConstraintKind::Length, "Too short.".to_string());
        result.add("login", ConstraintKind::Pattern, "Bad characters.".to_string());
        result.add("email", ConstraintKind::Required, "Required.".to_string());
        result
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert_eq!(result.len(), 0);
        assert!(result.messages("anything").is_empty());
    }

    #[test]
    fn test_messages_keep_order() {
        let result = sample();
        assert!(!result.is_valid());
        assert_eq!(result.fields().collect::<Vec<_>>(), vec!["login", "email"]);
        assert_eq!(result.messages("login"), vec!["Too short.", "Bad characters."]);
        assert_eq!(result.get("email").unwrap()[0].constraint, ConstraintKind::Required);
        assert!(!result.has_errors("password"));
    }

    #[test]
    fn test_json_and_display() {
        let result = sample();
        let json = result.to_json();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["login"][1], "Bad characters.");

        let text = result.to_string();
        assert_eq!(text, "login: Too short.\nlogin: Bad characters.\nemail: Required.\n");

        let plain = result.into_messages();
        assert_eq!(plain["email"], vec!["Required.".to_string()]);
    }

    #[test]
    fn test_serialize_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["login"][0]["constraint"], "length");
        assert_eq!(value["login"][0]["message"], "Too short.");
    }
}
