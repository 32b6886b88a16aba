// File: src/error.rs
// Purpose: Construction-time configuration errors and formatter errors

use std::fmt;

use thiserror::Error;

use crate::message::MessageKey;
use crate::rule::RuleName;

/// Why a single declaration token was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown rule name")]
    UnknownRule,

    #[error("invalid parameter value \"{0}\"")]
    InvalidParam(String),

    #[error("a parameter is required, e.g. rule[value]")]
    MissingParam,

    #[error("this rule does not take a parameter")]
    UnexpectedParam,

    #[error("malformed declaration \"{0}\"")]
    Malformed(String),
}

/// A problem found while building a validator
///
/// These are collected across every field and reported together through
/// [`ConfigErrors`]; a validator is never returned while any exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("The \"{rule}\" rule of \"{field}\" field is incorrect: {source}")]
    Rule {
        field: String,
        rule: String,
        #[source]
        source: RuleError,
    },

    #[error("The \"{rule}\" rule of \"{field}\" field references unknown field \"{target}\"")]
    UnknownTarget {
        field: String,
        rule: RuleName,
        target: String,
    },

    #[error("Field id \"{0}\" is declared more than once")]
    DuplicateField(String),

    #[error("Field ids must not be empty")]
    EmptyFieldId,

    #[error("Message \"{key}\" needed by the \"{rule}\" rule of \"{field}\" field is missing")]
    MissingMessage {
        field: String,
        rule: RuleName,
        key: MessageKey,
    },

    #[error("Message \"{key}\" uses unknown placeholder {{{placeholder}}}")]
    UnknownPlaceholder { key: MessageKey, placeholder: String },

    #[error("\"{0}\" option is required and must be a non-empty string")]
    MissingOption(&'static str),

    #[error("Choose exactly one way to display errors: error_container, real_time_checking or on_blur_checking")]
    ErrorDisplayMode,
}

/// Every configuration error found during one construction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.0
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

impl IntoIterator for ConfigErrors {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigErrors {
    type Item = &'a ConfigError;
    type IntoIter = std::slice::Iter<'a, ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Raised by [`crate::message::format`] when a template names a value that was not supplied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no value supplied for placeholder {{{0}}}")]
    MissingValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_error_names_field_and_rule() {
        let err = ConfigError::Rule {
            field: "username".to_string(),
            rule: "range_length".to_string(),
            source: RuleError::InvalidParam("10,5".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("range_length"));
        assert!(text.contains("username"));
        assert!(text.contains("10,5"));
    }

    #[test]
    fn test_config_errors_lists_every_error() {
        let errors = ConfigErrors::new(vec![
            ConfigError::EmptyFieldId,
            ConfigError::DuplicateField("email".to_string()),
        ]);
        let text = errors.to_string();
        assert!(text.starts_with("2 configuration error(s)"));
        assert!(text.contains("Field ids must not be empty"));
        assert!(text.contains("\"email\" is declared more than once"));
    }

    #[test]
    fn test_placeholder_braces_are_rendered() {
        let err = ConfigError::UnknownPlaceholder {
            key: MessageKey::IsNan,
            placeholder: "min".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Message \"is_nan\" uses unknown placeholder {min}"
        );
    }
}
