// Validation traits and shared context

use crate::{ConstraintKind, MessageCatalog, PatternRegistry, Result, value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A single constraint check.
///
/// Each constraint kind has one implementation; [`crate::Constraint`]
/// dispatches to it.
pub trait Rule {
    /// Kind this rule implements
    fn kind(&self) -> ConstraintKind;

    /// Check a present value. `Ok(false)` is a validation failure, `Err` is fatal.
    fn check(&self, value: &Value, context: &ValidationContext) -> Result<bool>;

    /// Number of non-null arguments, used to pick a message template
    fn arity(&self) -> usize;

    /// Placeholder values for message templates
    fn placeholders(&self) -> Vec<(String, String)>;
}

/// Read-only access to the data being validated.
pub trait DataSource {
    /// Value for `field`, if the key exists
    fn lookup(&self, field: &str) -> Option<&Value>;
}

impl DataSource for HashMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl DataSource for BTreeMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl DataSource for IndexMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl DataSource for serde_json::Map<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

/// Which values count as missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Only absent keys and `null`
    #[default]
    NullOnly,
    /// Also anything loosely equal to null: `""`, `0`, `false`, empty collections
    Loose,
}

impl MissingPolicy {
    pub fn is_missing(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) | (_, Some(Value::Null)) => true,
            (MissingPolicy::NullOnly, Some(_)) => false,
            (MissingPolicy::Loose, Some(v)) => value::loose_eq(v, &Value::Null),
        }
    }
}

/// Pattern classes, message templates and missing-value policy shared by
/// validators.
///
/// Build it once and hand it to validators behind an `Arc`. Validators that
/// change their own patterns or messages get a private copy.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub patterns: PatternRegistry,
    pub messages: MessageCatalog,
    pub missing: MissingPolicy,
}

impl ValidationContext {
    /// Context with the built-in patterns and default messages
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(mut self, patterns: PatternRegistry) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Register a pattern class, replacing one with the same name
    pub fn with_pattern(mut self, name: impl Into<String>, source: &str) -> Result<Self> {
        self.patterns.set_pattern(name, source)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_only_policy() {
        let policy = MissingPolicy::NullOnly;
        assert!(policy.is_missing(None));
        assert!(policy.is_missing(Some(&Value::Null)));
        assert!(!policy.is_missing(Some(&json!(""))));
        assert!(!policy.is_missing(Some(&json!(0))));
    }

    #[test]
    fn test_loose_policy() {
        let policy = MissingPolicy::Loose;
        assert!(policy.is_missing(Some(&json!(""))));
        assert!(policy.is_missing(Some(&json!(0))));
        assert!(policy.is_missing(Some(&json!(false))));
        assert!(policy.is_missing(Some(&json!([]))));
        assert!(!policy.is_missing(Some(&json!("0"))));
        assert!(!policy.is_missing(Some(&json!("text"))));
    }

    #[test]
    fn test_context_builder() {
        let context = ValidationContext::new()
            .with_missing(MissingPolicy::Loose)
            .with_pattern("zip", r"^\d{2}-\d{3}$")
            .unwrap();
        assert_eq!(context.missing, MissingPolicy::Loose);
        assert!(context.patterns.contains("zip"));
        assert!(context.patterns.contains("email"));
    }

    #[test]
    fn test_data_sources() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), json!("John"));
        assert_eq!(map.lookup("name"), Some(&json!("John")));
        assert_eq!(map.lookup("age"), None);

        let object = json!({"name": "John"});
        let object = object.as_object().unwrap();
        assert_eq!(object.lookup("name"), Some(&json!("John")));
    }
}
