// Named pattern classes

use crate::{Result, ValidatorError};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Accented Latin letters accepted by the `text` class.
const ACCENTED: &str = "żźćńółęąśŻŹĆĄŚĘŁÓŃ";

// Built-in classes. A class matches when every one of its expressions finds a
// match somewhere in the value; only explicit anchors pin it to the ends.
fn builtin_sources() -> Vec<(&'static str, Vec<String>)> {
    vec![
        (
            "email",
            vec![r"[_a-z0-9-]+(\.[_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,3})$".to_string()],
        ),
        ("digits", vec![r"[0-9]+$".to_string()]),
        ("text", vec![format!(r"[A-Za-z0-9_{}]+$", ACCENTED)]),
        ("whitespace", vec![r"^[^\s]+$".to_string()]),
        (
            "password_weak",
            vec![r"^.{6,}$".to_string(), "[a-z]".to_string(), "[0-9]".to_string()],
        ),
        (
            "password_medium",
            vec![
                r"^.{6,}$".to_string(),
                "[A-Z]".to_string(),
                "[a-z]".to_string(),
                "[0-9]".to_string(),
            ],
        ),
        (
            "password_strong",
            vec![
                r"^.{8,}$".to_string(),
                "[A-Z]".to_string(),
                "[a-z]".to_string(),
                "[^A-Za-z0-9_]".to_string(),
                "[0-9]".to_string(),
            ],
        ),
    ]
}

static BUILTINS: Lazy<IndexMap<String, PatternClass>> = Lazy::new(|| {
    builtin_sources()
        .into_iter()
        .map(|(name, sources)| {
            let class = PatternClass::all_of(&sources).expect("built-in patterns compile");
            (name.to_string(), class)
        })
        .collect()
});

/// A named pattern: one or more expressions that must all match.
#[derive(Debug, Clone)]
pub struct PatternClass {
    expressions: Vec<Regex>,
}

impl PatternClass {
    /// Compile a single expression
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            expressions: vec![Regex::new(source)?],
        })
    }

    /// Compile a conjunction of expressions
    pub fn all_of<S: AsRef<str>>(sources: &[S]) -> std::result::Result<Self, regex::Error> {
        let expressions = sources
            .iter()
            .map(|s| Regex::new(s.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { expressions })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.expressions.iter().all(|re| re.is_match(value))
    }

    /// Expression sources, in registration order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.expressions.iter().map(Regex::as_str)
    }
}

impl From<Regex> for PatternClass {
    fn from(regex: Regex) -> Self {
        Self {
            expressions: vec![regex],
        }
    }
}

/// Registry of named pattern classes.
///
/// `PatternRegistry::default()` is seeded with the built-in classes:
/// `email`, `digits`, `text`, `whitespace`, `password_weak`,
/// `password_medium` and `password_strong`.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    classes: IndexMap<String, PatternClass>,
}

impl PatternRegistry {
    /// Registry without any classes
    pub fn empty() -> Self {
        Self {
            classes: IndexMap::new(),
        }
    }

    /// Register or overwrite a class from a regex source
    pub fn set_pattern(&mut self, name: impl Into<String>, source: &str) -> Result<()> {
        let name = name.into();
        let class = PatternClass::new(source).map_err(|source| ValidatorError::InvalidPattern {
            name: name.clone(),
            source,
        })?;
        self.classes.insert(name, class);
        Ok(())
    }

    /// Register or overwrite an already compiled class
    pub fn insert(&mut self, name: impl Into<String>, class: impl Into<PatternClass>) {
        self.classes.insert(name.into(), class.into());
    }

    pub fn get(&self, name: &str) -> Option<&PatternClass> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Test `value` against the class called `name`
    pub fn matches(&self, name: &str, value: &str) -> Result<bool> {
        self.classes
            .get(name)
            .map(|class| class.is_match(value))
            .ok_or_else(|| ValidatorError::UnknownPattern(name.to_string()))
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self {
            classes: BUILTINS.clone(),
        }
    }
}
