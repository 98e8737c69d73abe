// Constraint set builder

use crate::validators::{Compare, Extension, Length, OneOf, Pattern, Required, Unique};
use crate::{Constraint, ConstraintKind, Rule};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Constraints and message overrides for one field.
///
/// Constraint methods append in call order. Registering the same kind twice
/// replaces its arguments but keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    field: String,
    constraints: IndexMap<ConstraintKind, Constraint>,
    overrides: HashMap<ConstraintKind, String>,
    last: Option<ConstraintKind>,
}

impl FieldRules {
    /// Create new rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraints: IndexMap::new(),
            overrides: HashMap::new(),
            last: None,
        }
    }

    /// Add a constraint
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, constraint: Constraint) -> Self {
        self.insert(constraint);
        self
    }

    pub fn required(self) -> Self {
        self.add(Constraint::Required(Required))
    }

    pub fn length(self, min: usize, max: Option<usize>) -> Self {
        self.add(Constraint::Length(Length::new(min, max)))
    }

    /// Reject values already present in `taken`
    pub fn unique<I, V>(self, taken: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add(Constraint::Unique(Unique(
            taken.into_iter().map(Into::into).collect(),
        )))
    }

    pub fn pattern(self, class: impl Into<String>) -> Self {
        self.add(Constraint::Pattern(Pattern(class.into())))
    }

    pub fn compare(self, expected: impl Into<Value>) -> Self {
        self.add(Constraint::Compare(Compare(expected.into())))
    }

    /// The `in` constraint
    pub fn one_of<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.add(Constraint::In(OneOf(
            allowed.into_iter().map(Into::into).collect(),
        )))
    }

    pub fn ext<I, S>(self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add(Constraint::Ext(Extension(
            extensions.into_iter().map(Into::into).collect(),
        )))
    }

    /// Custom message for the most recently added constraint
    pub fn message(mut self, template: impl Into<String>) -> Self {
        match self.last {
            Some(kind) => {
                self.overrides.insert(kind, template.into());
            }
            None => warn!(
                field = %self.field,
                "Message override ignored: no constraint added yet"
            ),
        }
        self
    }

    /// Custom message for a specific constraint kind
    pub fn message_for(mut self, kind: ConstraintKind, template: impl Into<String>) -> Self {
        self.overrides.insert(kind, template.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Constraints in evaluation order
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn get(&self, kind: ConstraintKind) -> Option<&Constraint> {
        self.constraints.get(&kind)
    }

    pub fn override_for(&self, kind: ConstraintKind) -> Option<&str> {
        self.overrides.get(&kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    fn insert(&mut self, constraint: Constraint) {
        let kind = constraint.kind();
        self.constraints.insert(kind, constraint);
        self.last = Some(kind);
    }

    fn merge(&mut self, other: FieldRules) {
        for constraint in other.constraints.into_values() {
            self.insert(constraint);
        }
        self.overrides.extend(other.overrides);
        if other.last.is_some() {
            self.last = other.last;
        }
    }
}

/// Ordered constraints for every field.
///
/// ```
/// use fieldguard_validation::{ConstraintSet, FieldRules};
///
/// let constraints = ConstraintSet::new()
///     .field(FieldRules::for_field("email").required().pattern("email"))
///     .field(
///         FieldRules::for_field("password")
///             .required()
///             .length(8, Some(64))
///             .message("Between {min} and {max} characters, please."),
///     );
///
/// assert_eq!(constraints.fields().collect::<Vec<_>>(), vec!["email", "password"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    fields: IndexMap<String, FieldRules>,
}

impl ConstraintSet {
    /// Create an empty constraint set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field.
    ///
    /// Rules for a field that is already present are merged into it.
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.insert(rules);
        self
    }

    /// Add rules for a field in place
    pub fn insert(&mut self, rules: FieldRules) {
        match self.fields.get_mut(rules.field()) {
            Some(existing) => existing.merge(rules),
            None => {
                self.fields.insert(rules.field.clone(), rules);
            }
        }
    }

    /// Add a single constraint to a field
    pub fn add(&mut self, field: &str, constraint: Constraint) {
        self.insert(FieldRules::for_field(field).add(constraint));
    }

    /// Attach a custom message to a field's constraint
    pub fn override_message(
        &mut self,
        field: &str,
        kind: ConstraintKind,
        template: impl Into<String>,
    ) {
        self.insert(FieldRules::for_field(field).message_for(kind, template));
    }

    /// Field names in registration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn rules(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.values()
    }

    pub fn rules_for(&self, field: &str) -> Option<&FieldRules> {
        self.fields.get(field)
    }

    pub fn get(&self, field: &str, kind: ConstraintKind) -> Option<&Constraint> {
        self.fields.get(field).and_then(|rules| rules.get(kind))
    }

    pub fn override_for(&self, field: &str, kind: ConstraintKind) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|rules| rules.override_for(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
