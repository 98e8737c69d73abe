//! Declarative field validation
//!
//! Describe the constraints each input field must satisfy, run them against a
//! map of field values, and get back human-readable messages per field.
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use fieldguard_validation::{ConstraintSet, FieldRules, Validator};
//! use serde_json::json;
//!
//! let mut validator = Validator::new(
//!     ConstraintSet::new()
//!         .field(FieldRules::for_field("email").required().pattern("email"))
//!         .field(FieldRules::for_field("password").required().length(6, None))
//!         .field(
//!             FieldRules::for_field("password_repeat")
//!                 .required()
//!                 .compare("secret1")
//!                 .message("Passwords do not match."),
//!         ),
//! );
//!
//! let data = json!({
//!     "email": "john@example.com",
//!     "password": "secret1",
//!     "password_repeat": "secret2",
//! });
//!
//! assert!(!validator.validate_json(&data).unwrap());
//! let result = validator.result().unwrap();
//! assert_eq!(result.messages("password_repeat"), vec!["Passwords do not match."]);
//! assert!(!result.has_errors("email"));
//! ```
//!
//! ## Custom Patterns and Messages
//!
//! ```
//! use fieldguard_validation::{ConstraintKind, ConstraintSet, FieldRules, Validator};
//! use std::collections::HashMap;
//! use serde_json::json;
//!
//! let mut validator =
//!     Validator::new(ConstraintSet::new().field(FieldRules::for_field("zip").pattern("zip")));
//! validator.set_pattern("zip", r"^[0-9]{2}-[0-9]{3}$").unwrap();
//! validator.set_message(ConstraintKind::Pattern, ["Invalid format."]);
//!
//! let data = HashMap::from([("zip".to_string(), json!("00950"))]);
//! let result = validator.evaluate(&data).unwrap();
//! assert_eq!(result.messages("zip"), vec!["Invalid format."]);
//! ```

mod config;
mod constraints;
mod errors;
mod evaluator;
mod messages;
mod patterns;
mod result;
mod rules;
mod traits;
pub mod validators;
pub mod value;

pub use config::*;
pub use constraints::*;
pub use errors::*;
pub use evaluator::*;
pub use messages::*;
pub use patterns::*;
pub use result::*;
pub use rules::*;
pub use traits::*;

pub use serde_json::Value;
