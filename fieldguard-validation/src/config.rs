// Validator configuration files

use crate::{
    Constraint, ConstraintKind, ConstraintSet, FieldRules, MessageTemplate, MissingPolicy, Result,
    ValidationContext, Validator, ValidatorError,
};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Detect the format from a file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ValidatorError::UnsupportedFormat(path.display().to_string()))?;

        Self::from_extension(ext).ok_or_else(|| ValidatorError::UnsupportedFormat(ext.to_string()))
    }
}

/// One constraint as written in a configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstraintSpec {
    /// Constraint name, e.g. `"length"`
    pub rule: String,

    /// Constraint arguments
    #[serde(default)]
    pub args: Option<Value>,

    /// Custom message for this field and constraint
    #[serde(default)]
    pub message: Option<String>,
}

/// Validator described in a configuration file.
///
/// ```toml
/// missing = "null_only"
///
/// [patterns]
/// zip = '^[0-9]{2}-[0-9]{3}$'
///
/// [messages]
/// required = "Cannot be blank."
/// length = ["At least {min}.", "Between {min} and {max}."]
///
/// [fields]
/// email = [{ rule = "required" }, { rule = "pattern", args = "email" }]
/// zip = [{ rule = "pattern", args = "zip", message = "Use NN-NNN." }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub missing: MissingPolicy,
    pub patterns: IndexMap<String, String>,
    pub messages: IndexMap<String, MessageTemplate>,
    pub fields: IndexMap<String, Vec<ConstraintSpec>>,
}

impl ValidatorConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse configuration from string
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => Self::from_json_str(content),
            FileFormat::Toml => Self::from_toml_str(content),
        }
    }

    /// Load a configuration file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;

        info!(
            path = %path.display(),
            fields = config.fields.len(),
            patterns = config.patterns.len(),
            "Loaded validator configuration"
        );

        Ok(config)
    }

    /// Build the context: built-in patterns and messages plus this file's
    pub fn context(&self) -> Result<ValidationContext> {
        let mut context = ValidationContext::new().with_missing(self.missing);

        for (name, source) in &self.patterns {
            context.patterns.set_pattern(name.clone(), source)?;
        }

        for (name, template) in &self.messages {
            let kind: ConstraintKind = name.parse()?;
            context.messages.set_template(kind, template.clone());
        }

        Ok(context)
    }

    /// Build the constraint set, keeping field and rule order
    pub fn constraints(&self) -> Result<ConstraintSet> {
        let mut constraints = ConstraintSet::new();

        for (field, specs) in &self.fields {
            let mut rules = FieldRules::for_field(field.clone());
            for spec in specs {
                rules = rules.add(Constraint::from_parts(&spec.rule, spec.args.as_ref())?);
                if let Some(message) = &spec.message {
                    rules = rules.message(message.clone());
                }
            }
            constraints.insert(rules);
        }

        Ok(constraints)
    }

    /// Build a ready validator
    pub fn build(&self) -> Result<Validator> {
        Ok(Validator::with_context(
            self.constraints()?,
            Arc::new(self.context()?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    const TOML_CONFIG: &str = r#"
        missing = "loose"

        [patterns]
        zip = '^[0-9]{2}-[0-9]{3}$'

        [messages]
        required = "Cannot be blank."
        length = ["At least {min}.", "Between {min} and {max}."]

        [fields]
        zip = [
            { rule = "required" },
            { rule = "pattern", args = "zip", message = "Use NN-NNN." },
        ]
        login = [{ rule = "length", args = { min = 3, max = 8 } }]
    "#;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert!(matches!(
            FileFormat::from_path(Path::new("rules.yaml")),
            Err(ValidatorError::UnsupportedFormat(_))
        ));
        assert!(FileFormat::from_path(Path::new("rules")).is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config = ValidatorConfig::from_toml_str(TOML_CONFIG).unwrap();
        assert_eq!(config.missing, MissingPolicy::Loose);
        assert_eq!(config.fields.keys().collect::<Vec<_>>(), vec!["zip", "login"]);
        assert_eq!(config.fields["zip"][1].message.as_deref(), Some("Use NN-NNN."));
    }

    #[test]
    fn test_build_from_toml() {
        let validator = ValidatorConfig::from_toml_str(TOML_CONFIG)
            .unwrap()
            .build()
            .unwrap();

        let mut data = HashMap::new();
        data.insert("zip".to_string(), json!("00950"));
        data.insert("login".to_string(), json!("ab"));

        let result = validator.evaluate(&data).unwrap();
        assert_eq!(result.messages("zip"), vec!["Use NN-NNN."]);
        assert_eq!(result.messages("login"), vec!["Between 3 and 8."]);

        data.insert("zip".to_string(), json!(""));
        let result = validator.evaluate(&data).unwrap();
        assert_eq!(result.messages("zip"), vec!["Cannot be blank."]);
    }

    #[test]
    fn test_parse_json() {
        let config = ValidatorConfig::from_json_str(
            r#"{
                "fields": {
                    "role": [{ "rule": "in", "args": ["admin", "editor"] }],
                    "avatar": [{ "rule": "ext", "args": ["jpg", "png"] }]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.missing, MissingPolicy::NullOnly);

        let constraints = config.constraints().unwrap();
        assert_eq!(constraints.fields().collect::<Vec<_>>(), vec!["role", "avatar"]);
    }

    #[test]
    fn test_unknown_names_are_errors() {
        let config = ValidatorConfig::from_json_str(
            r#"{ "fields": { "age": [{ "rule": "between", "args": [1, 2] }] } }"#,
        )
        .unwrap();
        assert!(matches!(
            config.build(),
            Err(ValidatorError::UnknownConstraint(name)) if name == "between"
        ));

        let config =
            ValidatorConfig::from_json_str(r#"{ "messages": { "size": "Too big." } }"#).unwrap();
        assert!(matches!(
            config.context(),
            Err(ValidatorError::UnknownConstraint(_))
        ));
    }

    #[test]
    fn test_empty_message_list_keeps_default() {
        let validator = ValidatorConfig::from_json_str(
            r#"{
                "messages": { "length": [] },
                "fields": { "f": [{ "rule": "length", "args": 6 }] }
            }"#,
        )
        .unwrap()
        .build()
        .unwrap();

        let mut data = HashMap::new();
        data.insert("f".to_string(), json!("abc"));
        let result = validator.evaluate(&data).unwrap();
        assert_eq!(
            result.messages("f"),
            vec!["This field must contain at least 6 characters."]
        );
    }

    #[test]
    fn test_invalid_pattern_source() {
        let config = ValidatorConfig::from_json_str(r#"{ "patterns": { "bad": "(" } }"#).unwrap();
        assert!(matches!(
            config.context(),
            Err(ValidatorError::InvalidPattern { name, .. }) if name == "bad"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("fieldguard-{}.toml", std::process::id()));
        fs::write(&path, TOML_CONFIG).unwrap();

        let config = ValidatorConfig::load(&path).unwrap();
        assert!(config.patterns.contains_key("zip"));

        fs::remove_file(&path).unwrap();
        assert!(matches!(
            ValidatorConfig::load(&path),
            Err(ValidatorError::Io(_))
        ));
    }
}
