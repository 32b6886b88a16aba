// File: src/message.rs
// Purpose: Message templates, placeholder substitution and catalog checks

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConfigError, FormatError};
use crate::rule::{ParsedRule, RuleName};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Catalog key of a message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKey {
    /// Message of the named rule
    Rule(RuleName),
    /// Value of a numeric comparison is not a number
    IsNan,
    /// `required_one_of` on a checkbox group
    RequiredCheckbox,
    /// `required_one_of` on a radio group
    RequiredRadio,
}

impl MessageKey {
    /// Every key the built-in catalog defines
    pub fn all() -> Vec<MessageKey> {
        RuleName::ALL
            .iter()
            .filter(|rule| **rule != RuleName::RequiredOneOf)
            .map(|rule| MessageKey::Rule(*rule))
            .chain([
                MessageKey::IsNan,
                MessageKey::RequiredCheckbox,
                MessageKey::RequiredRadio,
            ])
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::Rule(rule) => rule.as_str(),
            MessageKey::IsNan => "is_nan",
            MessageKey::RequiredCheckbox => "required_checkbox",
            MessageKey::RequiredRadio => "required_radio",
        }
    }

    /// Resolves a catalog key, accepting the camel-case spellings of older language files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "is_nan" => Some(MessageKey::IsNan),
            "required_checkbox" | "requiredCheckbox" => Some(MessageKey::RequiredCheckbox),
            "required_radio" | "requiredRadio" => Some(MessageKey::RequiredRadio),
            other => RuleName::from_name(other)
                .filter(|rule| *rule != RuleName::RequiredOneOf)
                .map(MessageKey::Rule),
        }
    }

    /// Templates rendered verbatim, without placeholder substitution
    pub fn is_static(self) -> bool {
        matches!(
            self,
            MessageKey::Rule(RuleName::Password) | MessageKey::Rule(RuleName::CreditCard)
        )
    }

    /// Placeholders the engine supplies when rendering this key
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            MessageKey::Rule(rule) => match rule {
                RuleName::MinLength => &["field", "min"],
                RuleName::MaxLength => &["field", "max"],
                RuleName::ExactLength => &["field", "exact"],
                RuleName::RangeLength => &["field", "min", "max"],
                RuleName::GreaterThan
                | RuleName::GreaterThanEqualTo
                | RuleName::LessThan
                | RuleName::LessThanEqualTo => &["field", "number"],
                RuleName::InList => &["values", "field"],
                RuleName::EqualTo | RuleName::DifferentFrom => &["field", "target"],
                RuleName::Date => &["field", "format"],
                _ => &["field"],
            },
            _ => &["field"],
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitutes every `{name}` placeholder with `values[name]`
///
/// Pure function: a placeholder without a value is an error rather than
/// being passed through.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use rusty_rules::message::format;
///
/// let values = HashMap::from([("field", "Username".to_string()), ("min", "5".to_string())]);
/// let text = format("{field} requires a minimum of {min} characters", &values).unwrap();
/// assert_eq!(text, "Username requires a minimum of 5 characters");
/// ```
pub fn format(template: &str, values: &HashMap<&str, String>) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = values
            .get(name.as_str())
            .ok_or_else(|| FormatError::MissingValue(name.as_str().to_string()))?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Names of the placeholders a template uses, in order of appearance
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Message templates keyed by rule
///
/// Starts from the built-in English defaults; a language file replaces
/// the whole table, mirroring how translated catalogs are shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<MessageKey, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::defaults()
    }
}

impl MessageCatalog {
    /// Built-in English templates
    pub fn defaults() -> Self {
        let templates = MessageKey::all()
            .into_iter()
            .map(|key| (key, default_template(key).to_string()))
            .collect();
        Self { templates }
    }

    /// A catalog with no templates at all
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Builds a catalog from a flat `{ "key": "template" }` JSON object
    ///
    /// Only the keys present in the document are defined. Unknown keys are
    /// skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::empty().with_overrides(raw))
    }

    /// Replaces individual templates, keeping every other key
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, template) in overrides {
            match MessageKey::from_name(name.as_ref()) {
                Some(key) => {
                    self.templates.insert(key, template.into());
                }
                None => {
                    tracing::warn!(key = name.as_ref(), "ignoring unknown message key");
                }
            }
        }
        self
    }

    pub fn set(&mut self, key: MessageKey, template: impl Into<String>) {
        self.templates.insert(key, template.into());
    }

    pub fn get(&self, key: MessageKey) -> Option<&str> {
        self.templates.get(&key).map(String::as_str)
    }

    /// Keys a parsed rule can emit when it is violated
    pub fn keys_for(rule: &ParsedRule) -> Vec<MessageKey> {
        Self::keys_for_name(rule.name())
    }

    pub fn keys_for_name(rule: RuleName) -> Vec<MessageKey> {
        match rule {
            RuleName::RequiredOneOf => {
                vec![MessageKey::RequiredCheckbox, MessageKey::RequiredRadio]
            }
            name @ (RuleName::GreaterThan
            | RuleName::GreaterThanEqualTo
            | RuleName::LessThan
            | RuleName::LessThanEqualTo) => vec![MessageKey::Rule(name), MessageKey::IsNan],
            name => vec![MessageKey::Rule(name)],
        }
    }

    /// Checks that every message `rule` can emit exists and renders
    pub fn check_rule(&self, field: &str, rule: &ParsedRule) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for key in Self::keys_for(rule) {
            let Some(template) = self.get(key) else {
                errors.push(ConfigError::MissingMessage {
                    field: field.to_string(),
                    rule: rule.name(),
                    key,
                });
                continue;
            };

            if key.is_static() {
                continue;
            }

            let allowed = key.placeholders();
            for name in placeholders(template) {
                if !allowed.contains(&name) {
                    errors.push(ConfigError::UnknownPlaceholder {
                        key,
                        placeholder: name.to_string(),
                    });
                }
            }
        }

        errors
    }

    /// Renders the template for `key` with the supplied values
    ///
    /// Construction checks every template a validator can reach, so the
    /// fallbacks below only fire for catalogs used outside a validator.
    pub fn render(&self, key: MessageKey, values: &HashMap<&str, String>) -> String {
        let Some(template) = self.get(key) else {
            tracing::warn!(%key, "no message template, using key name");
            return key.as_str().to_string();
        };

        if key.is_static() {
            return template.to_string();
        }

        format(template, values).unwrap_or_else(|err| {
            tracing::warn!(%key, error = %err, "message template could not be rendered");
            template.to_string()
        })
    }

    /// Iterates templates in a stable key order
    pub fn iter(&self) -> impl Iterator<Item = (MessageKey, &str)> {
        let mut entries: Vec<_> = self
            .templates
            .iter()
            .map(|(key, template)| (*key, template.as_str()))
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries.into_iter()
    }
}

fn default_template(key: MessageKey) -> &'static str {
    match key {
        MessageKey::IsNan => "{field} must be a number.",
        MessageKey::RequiredCheckbox => {
            "{field} is required. One of the checkboxes must be checked."
        }
        MessageKey::RequiredRadio => "{field} is required. Select an option.",
        MessageKey::Rule(rule) => match rule {
            RuleName::Required | RuleName::RequiredOneOf => "{field} is required.",
            RuleName::MinLength => "{field} requires a minimum of {min} characters",
            RuleName::MaxLength => "{field} requires a maximum of {max} characters",
            RuleName::ExactLength => "{field} requires exactly {exact} characters",
            RuleName::RangeLength => "{field} requires between {min} and {max} characters",
            RuleName::GreaterThan => "{field} requires a value greater than {number}",
            RuleName::GreaterThanEqualTo => {
                "{field} requires a value greater than or equal to {number}"
            }
            RuleName::LessThan => "{field} requires a value less than {number}",
            RuleName::LessThanEqualTo => "{field} requires a value less than or equal to {number}",
            RuleName::InList => "{field} accepts only '{values}' values",
            RuleName::EqualTo => "{field} must be identical to the {target} field",
            RuleName::DifferentFrom => "{field} must be different from the {target} field",
            RuleName::Date => "{field} must contain a valid date. Format: {format}",
            RuleName::Alpha => "{field} accepts only alphabetical characters",
            RuleName::AlphaNumeric => "{field} accepts only alpha-numeric characters",
            RuleName::AlphaDash => {
                "{field} accepts only alpha-numeric characters, underscores, and dashes"
            }
            RuleName::AlphaSpace => "{field} accepts only alphabetical characters and spaces",
            RuleName::AlphaNumericSpace => {
                "{field} accepts only alpha-numeric characters and spaces"
            }
            RuleName::AlphaDashSpace => {
                "{field} accepts only alpha-numeric characters, underscores, dashes and spaces"
            }
            RuleName::Numeric => {
                "{field} accepts only numbers (integer or decimal, positive or negative)"
            }
            RuleName::Integer => "{field} accepts only numbers (integer, positive or negative)",
            RuleName::Decimal => {
                "{field} accepts only numbers (decimal, positive or negative, e.g. 10.55)"
            }
            RuleName::Natural => "{field} accepts only digits",
            RuleName::NaturalNoZero => "{field} accepts only digits and must be greater than zero",
            RuleName::Email => "{field} must contain a valid email address",
            RuleName::IpAddress => "{field} must contain a valid IP address",
            RuleName::Base64 => "{field} must contain a base64 string",
            RuleName::Url => "{field} must contain a valid url",
            RuleName::Time => "{field} must contain a valid time. Format: hh:mm:ss",
            RuleName::Password => {
                "The password must be at least 6 characters long and contain at least 1 uppercase, \
                 1 lowercase, 1 digit and a special character ($, @, !, %, *, ?, &)"
            }
            RuleName::CreditCard => {
                "Incorrect number. Accepted cards: Visa, MasterCard, American Express, \
                 Diners Club, Discover and JCB"
            }
        },
    }
}
