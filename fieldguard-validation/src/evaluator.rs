//! Constraint evaluation
//!
//! A [`Validator`] walks its [`ConstraintSet`] field by field, in registration
//! order, and checks each constraint in turn:
//!
//! - a present value runs every constraint; failures are collected and the
//!   remaining constraints still run
//! - a missing value skips every constraint except `required`, which records
//!   its message and stops the field
//!
//! Configuration errors (an unregistered pattern class) abort evaluation and
//! no result is kept.

use crate::{
    ConstraintKind, ConstraintSet, DataSource, MessageResolver, Result, Rule, ValidationContext,
    ValidationResult, ValidatorError,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// A validation engine for one set of constraints.
#[derive(Debug, Clone)]
pub struct Validator {
    context: Arc<ValidationContext>,
    constraints: ConstraintSet,
    result: Option<ValidationResult>,
}

impl Validator {
    /// Validator with the built-in patterns and default messages
    pub fn new(constraints: ConstraintSet) -> Self {
        Self::with_context(constraints, Arc::new(ValidationContext::default()))
    }

    /// Validator sharing an existing context
    pub fn with_context(constraints: ConstraintSet, context: Arc<ValidationContext>) -> Self {
        Self {
            context,
            constraints,
            result: None,
        }
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn context(&self) -> &Arc<ValidationContext> {
        &self.context
    }

    /// Register a pattern class for this validator.
    ///
    /// A shared context is copied first, so other validators are unaffected.
    pub fn set_pattern(&mut self, name: impl Into<String>, source: &str) -> Result<()> {
        Arc::make_mut(&mut self.context)
            .patterns
            .set_pattern(name, source)
    }

    /// Replace the default template(s) for a constraint kind on this validator
    pub fn set_message<I, S>(&mut self, kind: ConstraintKind, templates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.context)
            .messages
            .set_message(kind, templates);
    }

    /// Evaluate `data` without storing the result
    pub fn evaluate<D: DataSource + ?Sized>(&self, data: &D) -> Result<ValidationResult> {
        let context = self.context.as_ref();
        let resolver = MessageResolver::new(&context.messages, &self.constraints);
        let mut result = ValidationResult::new();

        for rules in self.constraints.rules() {
            let field = rules.field();
            let value = data.lookup(field);
            let missing = context.missing.is_missing(value);

            for constraint in rules.constraints() {
                let kind = constraint.kind();

                match value {
                    Some(value) if !missing => {
                        if !constraint.check(value, context)? {
                            debug!(field, constraint = %kind, "Constraint failed");
                            result.add(field, kind, resolver.resolve(field, constraint));
                        }
                    }
                    _ if kind == ConstraintKind::Required => {
                        debug!(field, "Required value missing");
                        result.add(field, kind, resolver.resolve(field, constraint));
                        break;
                    }
                    _ => trace!(field, constraint = %kind, "Skipped for missing value"),
                }
            }
        }

        debug!(
            fields = self.constraints.len(),
            failed = result.len(),
            "Validation finished"
        );

        Ok(result)
    }

    /// Evaluate `data` and keep the result, replacing any previous one.
    ///
    /// Returns whether every field passed. On error no result is kept.
    pub fn validate<D: DataSource + ?Sized>(&mut self, data: &D) -> Result<bool> {
        self.result = None;
        let result = self.evaluate(data)?;
        let valid = result.is_valid();
        self.result = Some(result);
        Ok(valid)
    }

    /// Validate a JSON object
    pub fn validate_json(&mut self, data: &Value) -> Result<bool> {
        match data {
            Value::Object(map) => self.validate(map),
            _ => {
                self.result = None;
                Err(ValidatorError::NotAnObject)
            }
        }
    }

    /// Result of the last successful [`Validator::validate`] call
    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    /// Take the stored result out of the validator
    pub fn take_result(&mut self) -> Option<ValidationResult> {
        self.result.take()
    }
}
