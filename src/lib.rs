// Fieldguard - declarative field validation
//
// Constraints are declared per field, checked against a map of input values,
// and failures come back as templated messages grouped by field.

// Re-export optional crates
#[cfg(feature = "validation")]
pub use fieldguard_validation;

#[cfg(feature = "validation")]
pub use fieldguard_validation::{
    ConstraintKind, ConstraintSet, FieldRules, MessageCatalog, PatternRegistry, ValidationContext,
    ValidationResult, Validator, ValidatorConfig, ValidatorError, Value,
};

// Prelude for common imports
#[cfg(feature = "validation")]
pub mod prelude {
    pub use fieldguard_validation::{
        Constraint, ConstraintKind, ConstraintSet, DataSource, FieldRules, MessageCatalog,
        MessageTemplate, MissingPolicy, PatternRegistry, Result, Rule, ValidationContext,
        ValidationResult, Validator, ValidatorConfig, ValidatorError, Value, Violation,
    };
}
