// Built-in constraint checks

use crate::value::{as_text, contains_loose, display, loose_eq, measure};
use crate::{ConstraintKind, Result, Rule, ValidationContext};
use serde_json::Value;

fn list_placeholders(values: impl IntoIterator<Item = String>) -> Vec<(String, String)> {
    let values: Vec<String> = values.into_iter().collect();
    let mut placeholders = vec![("values".to_string(), values.join(", "))];
    placeholders.extend(
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value)),
    );
    placeholders
}

/// Value must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Required;

impl Rule for Required {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Required
    }

    fn check(&self, value: &Value, context: &ValidationContext) -> Result<bool> {
        Ok(!context.missing.is_missing(Some(value)))
    }

    fn arity(&self) -> usize {
        0
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Character length of at least `min` and, when given, at most `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    pub min: usize,
    pub max: Option<usize>,
}

impl Length {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }
}

impl Rule for Length {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Length
    }

    fn check(&self, value: &Value, _context: &ValidationContext) -> Result<bool> {
        let len = measure(value);
        Ok(len >= self.min && self.max.is_none_or(|max| len <= max))
    }

    fn arity(&self) -> usize {
        1 + usize::from(self.max.is_some())
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        // An absent max renders as an empty string
        vec![
            ("min".to_string(), self.min.to_string()),
            (
                "max".to_string(),
                self.max.map(|max| max.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

/// Value must not already be among the taken values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Unique(pub Vec<Value>);

impl Rule for Unique {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Unique
    }

    fn check(&self, value: &Value, _context: &ValidationContext) -> Result<bool> {
        Ok(!contains_loose(&self.0, value))
    }

    fn arity(&self) -> usize {
        self.0.iter().filter(|v| !v.is_null()).count()
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        list_placeholders(self.0.iter().map(display))
    }
}

/// Value must match a named pattern class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(pub String);

impl Rule for Pattern {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Pattern
    }

    /// Unknown classes are fatal even when the value has no text form.
    fn check(&self, value: &Value, context: &ValidationContext) -> Result<bool> {
        let class = context
            .patterns
            .get(&self.0)
            .ok_or_else(|| crate::ValidatorError::UnknownPattern(self.0.clone()))?;
        Ok(as_text(value).is_some_and(|text| class.is_match(&text)))
    }

    fn arity(&self) -> usize {
        1
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        vec![("pattern".to_string(), self.0.clone())]
    }
}

/// Value must loosely equal the expected value
#[derive(Debug, Clone, PartialEq)]
pub struct Compare(pub Value);

impl Rule for Compare {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Compare
    }

    fn check(&self, value: &Value, _context: &ValidationContext) -> Result<bool> {
        Ok(loose_eq(value, &self.0))
    }

    fn arity(&self) -> usize {
        usize::from(!self.0.is_null())
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        vec![("value".to_string(), display(&self.0))]
    }
}

/// Value must be one of the allowed values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OneOf(pub Vec<Value>);

impl Rule for OneOf {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::In
    }

    fn check(&self, value: &Value, _context: &ValidationContext) -> Result<bool> {
        Ok(contains_loose(&self.0, value))
    }

    fn arity(&self) -> usize {
        self.0.iter().filter(|v| !v.is_null()).count()
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        list_placeholders(self.0.iter().map(display))
    }
}

/// File name extension must be in the allowed list.
///
/// The extension is whatever follows the last `.`; a name without one is its
/// own extension. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extension(pub Vec<String>);

impl Extension {
    pub fn extension_of(name: &str) -> &str {
        name.rsplit('.').next().unwrap_or(name)
    }
}

impl Rule for Extension {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Ext
    }

    fn check(&self, value: &Value, _context: &ValidationContext) -> Result<bool> {
        let Some(name) = as_text(value) else {
            return Ok(false);
        };
        let extension = Value::String(Self::extension_of(&name).to_string());
        Ok(self
            .0
            .iter()
            .any(|allowed| loose_eq(&Value::String(allowed.clone()), &extension)))
    }

    fn arity(&self) -> usize {
        self.0.len()
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        list_placeholders(self.0.iter().cloned())
    }
}
