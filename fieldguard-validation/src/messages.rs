//! Message templates and resolution
//!
//! Every constraint kind has a default template in the [`MessageCatalog`].
//! Templates contain `{key}` placeholders filled from the constraint's
//! arguments, e.g. `{min}` and `{max}` for `length`.
//!
//! ```
//! use fieldguard_validation::{ConstraintKind, MessageCatalog};
//!
//! let mut catalog = MessageCatalog::default();
//! catalog.set_message(ConstraintKind::Length, ["At least {min}.", "Between {min} and {max}."]);
//! catalog.set_message(ConstraintKind::Required, ["Cannot be blank."]);
//! ```

use crate::{Constraint, ConstraintKind, ConstraintSet, Rule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A message template, or a list of templates selected by argument count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTemplate {
    Single(String),
    ByArity(Vec<String>),
}

impl MessageTemplate {
    /// Build from a list of templates: one gives `Single`, more give `ByArity`.
    pub fn from_templates<I, S>(templates: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut templates: Vec<String> = templates.into_iter().map(Into::into).collect();
        match templates.len() {
            0 => None,
            1 => templates.pop().map(MessageTemplate::Single),
            _ => Some(MessageTemplate::ByArity(templates)),
        }
    }

    /// Pick the template for a constraint with `arity` non-null arguments.
    ///
    /// `ByArity` uses `arity - 1` as index, clamped into the list.
    pub fn select(&self, arity: usize) -> &str {
        match self {
            MessageTemplate::Single(template) => template.as_str(),
            MessageTemplate::ByArity(templates) => {
                let index = arity.saturating_sub(1).min(templates.len().saturating_sub(1));
                templates.get(index).map(String::as_str).unwrap_or_default()
            }
        }
    }
}

impl From<&str> for MessageTemplate {
    fn from(template: &str) -> Self {
        MessageTemplate::Single(template.to_string())
    }
}

impl From<String> for MessageTemplate {
    fn from(template: String) -> Self {
        MessageTemplate::Single(template)
    }
}

/// Built-in template for a constraint kind
pub fn default_template(kind: ConstraintKind) -> MessageTemplate {
    match kind {
        ConstraintKind::Required => "This field is required.".into(),
        ConstraintKind::Length => MessageTemplate::ByArity(vec![
            "This field must contain at least {min} characters.".to_string(),
            "This field must contain between {min} and {max} characters.".to_string(),
        ]),
        ConstraintKind::Unique => "This value is already in use.".into(),
        ConstraintKind::Pattern => "Invalid field value.".into(),
        ConstraintKind::Compare => "Values do not match.".into(),
        ConstraintKind::In => "Unexpected field value.".into(),
        ConstraintKind::Ext => "Unsupported file format.".into(),
    }
}

/// Default message templates per constraint kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<ConstraintKind, MessageTemplate>,
}

impl MessageCatalog {
    /// Replace the template(s) for a constraint kind.
    ///
    /// One template is used as-is; several are selected by argument count.
    /// An empty list restores the built-in default.
    pub fn set_message<I, S>(&mut self, kind: ConstraintKind, templates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let template = MessageTemplate::from_templates(templates)
            .unwrap_or_else(|| default_template(kind));
        self.templates.insert(kind, template);
    }

    /// Replace the template for a constraint kind.
    ///
    /// An empty `ByArity` list restores the built-in default.
    pub fn set_template(&mut self, kind: ConstraintKind, template: MessageTemplate) {
        let template = match template {
            MessageTemplate::ByArity(templates) => MessageTemplate::from_templates(templates)
                .unwrap_or_else(|| default_template(kind)),
            single => single,
        };
        self.templates.insert(kind, template);
    }

    pub fn get(&self, kind: ConstraintKind) -> MessageTemplate {
        self.templates
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| default_template(kind))
    }

    fn select(&self, kind: ConstraintKind, arity: usize) -> String {
        match self.templates.get(&kind) {
            Some(template) => template.select(arity).to_string(),
            None => default_template(kind).select(arity).to_string(),
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let templates = ConstraintKind::ALL
            .iter()
            .map(|kind| (*kind, default_template(*kind)))
            .collect();
        Self { templates }
    }
}

/// Replace every `{key}` with its value. Unknown placeholders stay as they are.
pub fn substitute(template: &str, placeholders: &[(String, String)]) -> String {
    let mut result = template.to_string();

    for (key, value) in placeholders {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// Turns a failed constraint into its final message.
///
/// Precedence: the field's own override, then the catalog template for the
/// constraint kind.
pub struct MessageResolver<'a> {
    catalog: &'a MessageCatalog,
    constraints: &'a ConstraintSet,
}

impl<'a> MessageResolver<'a> {
    pub fn new(catalog: &'a MessageCatalog, constraints: &'a ConstraintSet) -> Self {
        Self {
            catalog,
            constraints,
        }
    }

    pub fn resolve(&self, field: &str, constraint: &Constraint) -> String {
        let kind = constraint.kind();
        let template = match self.constraints.override_for(field, kind) {
            Some(custom) => custom.to_string(),
            None => self.catalog.select(kind, constraint.arity()),
        };

        substitute(&template, &constraint.placeholders())
    }
}
