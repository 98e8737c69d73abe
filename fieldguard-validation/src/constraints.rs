// Constraint kinds

use crate::validators::{Compare, Extension, Length, OneOf, Pattern, Required, Unique};
use crate::{Result, Rule, ValidationContext, ValidatorError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

static NULL: Value = Value::Null;

/// Name of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Required,
    Length,
    Unique,
    Pattern,
    Compare,
    In,
    Ext,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 7] = [
        ConstraintKind::Required,
        ConstraintKind::Length,
        ConstraintKind::Unique,
        ConstraintKind::Pattern,
        ConstraintKind::Compare,
        ConstraintKind::In,
        ConstraintKind::Ext,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::Length => "length",
            ConstraintKind::Unique => "unique",
            ConstraintKind::Pattern => "pattern",
            ConstraintKind::Compare => "compare",
            ConstraintKind::In => "in",
            ConstraintKind::Ext => "ext",
        }
    }
}

impl FromStr for ConstraintKind {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self> {
        ConstraintKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidatorError::UnknownConstraint(s.to_string()))
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Required(Required),
    Length(Length),
    Unique(Unique),
    Pattern(Pattern),
    Compare(Compare),
    In(OneOf),
    Ext(Extension),
}

impl Constraint {
    fn rule(&self) -> &dyn Rule {
        match self {
            Constraint::Required(rule) => rule,
            Constraint::Length(rule) => rule,
            Constraint::Unique(rule) => rule,
            Constraint::Pattern(rule) => rule,
            Constraint::Compare(rule) => rule,
            Constraint::In(rule) => rule,
            Constraint::Ext(rule) => rule,
        }
    }

    /// Build a constraint from its name and loosely typed arguments.
    ///
    /// Accepted argument shapes:
    /// - `required`: none
    /// - `length`: `n`, `[min, max]` or `{ "min": n, "max": m }`
    /// - `unique`, `in`: a list (a scalar is a one-element list)
    /// - `pattern`: a class name
    /// - `compare`: any value
    /// - `ext`: a list of extensions (a string is a one-element list)
    pub fn from_parts(name: &str, args: Option<&Value>) -> Result<Self> {
        let kind: ConstraintKind = name.parse()?;
        let args = args.unwrap_or(&NULL);

        let constraint = match kind {
            ConstraintKind::Required => Constraint::Required(Required),
            ConstraintKind::Length => {
                let (min, max) = length_bounds(args)?;
                Constraint::Length(Length::new(min, max))
            }
            ConstraintKind::Unique => Constraint::Unique(Unique(value_list(args))),
            ConstraintKind::Pattern => match args {
                Value::String(class) => Constraint::Pattern(Pattern(class.clone())),
                _ => {
                    return Err(ValidatorError::invalid_arguments(
                        name,
                        "expected a pattern class name",
                    ));
                }
            },
            ConstraintKind::Compare => Constraint::Compare(Compare(args.clone())),
            ConstraintKind::In => Constraint::In(OneOf(value_list(args))),
            ConstraintKind::Ext => {
                let extensions = value_list(args)
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => Ok(s.clone()),
                        other => Err(ValidatorError::invalid_arguments(
                            name,
                            format!("extension must be a string, got {}", other),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Constraint::Ext(Extension(extensions))
            }
        };

        Ok(constraint)
    }
}

impl Rule for Constraint {
    fn kind(&self) -> ConstraintKind {
        self.rule().kind()
    }

    fn check(&self, value: &Value, context: &ValidationContext) -> Result<bool> {
        self.rule().check(value, context)
    }

    fn arity(&self) -> usize {
        self.rule().arity()
    }

    fn placeholders(&self) -> Vec<(String, String)> {
        self.rule().placeholders()
    }
}

fn value_list(args: &Value) -> Vec<Value> {
    match args {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

fn bound(value: &Value, which: &str) -> Result<Option<usize>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                ValidatorError::invalid_arguments(
                    "length",
                    format!("{} must be a non-negative integer", which),
                )
            }),
        _ => Err(ValidatorError::invalid_arguments(
            "length",
            format!("{} must be a number", which),
        )),
    }
}

fn length_bounds(args: &Value) -> Result<(usize, Option<usize>)> {
    let (min, max) = match args {
        Value::Number(_) => (bound(args, "min")?, None),
        Value::Array(items) => (
            bound(items.first().unwrap_or(&NULL), "min")?,
            bound(items.get(1).unwrap_or(&NULL), "max")?,
        ),
        Value::Object(map) => (
            bound(map.get("min").unwrap_or(&NULL), "min")?,
            bound(map.get("max").unwrap_or(&NULL), "max")?,
        ),
        _ => (None, None),
    };

    let min = min.ok_or_else(|| ValidatorError::invalid_arguments("length", "min is required"))?;
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip_names() {
        for kind in ConstraintKind::ALL {
            assert_eq!(kind.as_str().parse::<ConstraintKind>().unwrap(), kind);
        }
        assert_eq!(ConstraintKind::In.to_string(), "in");
    }

    #[test]
    fn test_unknown_constraint_name() {
        let err = "between".parse::<ConstraintKind>().unwrap_err();
        assert!(matches!(err, ValidatorError::UnknownConstraint(name) if name == "between"));

        let err = Constraint::from_parts("email", None).unwrap_err();
        assert!(matches!(err, ValidatorError::UnknownConstraint(_)));
    }

    #[test]
    fn test_length_argument_shapes() {
        assert_eq!(
            Constraint::from_parts("length", Some(&json!(6))).unwrap(),
            Constraint::Length(Length::new(6, None))
        );
        assert_eq!(
            Constraint::from_parts("length", Some(&json!([3, 5]))).unwrap(),
            Constraint::Length(Length::new(3, Some(5)))
        );
        assert_eq!(
            Constraint::from_parts("length", Some(&json!({"min": 2, "max": null}))).unwrap(),
            Constraint::Length(Length::new(2, None))
        );
        assert!(Constraint::from_parts("length", None).is_err());
        assert!(Constraint::from_parts("length", Some(&json!(-1))).is_err());
        assert!(Constraint::from_parts("length", Some(&json!({"max": 3}))).is_err());
    }

    #[test]
    fn test_other_argument_shapes() {
        assert_eq!(
            Constraint::from_parts("pattern", Some(&json!("email"))).unwrap(),
            Constraint::Pattern(Pattern("email".to_string()))
        );
        assert!(Constraint::from_parts("pattern", Some(&json!(1))).is_err());

        assert_eq!(
            Constraint::from_parts("ext", Some(&json!("pdf"))).unwrap(),
            Constraint::Ext(Extension(vec!["pdf".to_string()]))
        );
        assert!(Constraint::from_parts("ext", Some(&json!([1]))).is_err());

        assert_eq!(
            Constraint::from_parts("in", Some(&json!(["a", "b"]))).unwrap(),
            Constraint::In(OneOf(vec![json!("a"), json!("b")]))
        );
        assert_eq!(
            Constraint::from_parts("required", None).unwrap(),
            Constraint::Required(Required)
        );
    }

    #[test]
    fn test_dispatch() {
        let context = ValidationContext::default();
        let constraint = Constraint::Length(Length::new(3, Some(5)));
        assert_eq!(constraint.kind(), ConstraintKind::Length);
        assert!(constraint.check(&json!("abcd"), &context).unwrap());
        assert_eq!(constraint.arity(), 2);
    }
}
