// Configuration errors
//
// Failed constraints are not errors; they end up as `Violation`s in a
// `ValidationResult`. Everything here aborts evaluation.

use thiserror::Error;

/// Fatal errors raised while configuring or running a validator.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// A `pattern` constraint references a class that was never registered
    #[error("Pattern class not registered: {0}")]
    UnknownPattern(String),

    /// A constraint was named that the engine does not know
    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),

    /// A pattern source failed to compile
    #[error("Invalid pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Constraint arguments have the wrong shape
    #[error("Invalid arguments for '{constraint}': {reason}")]
    InvalidArguments { constraint: String, reason: String },

    /// JSON input was expected to be an object of fields
    #[error("Input data must be a JSON object")]
    NotAnObject,

    /// Configuration file has an extension we cannot parse
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ValidatorError {
    pub(crate) fn invalid_arguments(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
