// File: src/rule.rs
// Purpose: Rule names, parameter shapes and the parsed rule type

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::DateFormat;
use crate::patterns::Pattern;

/// Every rule a declaration may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    Required,
    RequiredOneOf,
    MinLength,
    MaxLength,
    ExactLength,
    RangeLength,
    GreaterThan,
    GreaterThanEqualTo,
    LessThan,
    LessThanEqualTo,
    InList,
    EqualTo,
    DifferentFrom,
    Date,
    Alpha,
    AlphaNumeric,
    AlphaDash,
    AlphaSpace,
    AlphaNumericSpace,
    AlphaDashSpace,
    Numeric,
    Integer,
    Decimal,
    Natural,
    NaturalNoZero,
    Email,
    IpAddress,
    Base64,
    Url,
    Time,
    Password,
    CreditCard,
}

impl RuleName {
    pub const ALL: [RuleName; 32] = [
        RuleName::Required,
        RuleName::RequiredOneOf,
        RuleName::MinLength,
        RuleName::MaxLength,
        RuleName::ExactLength,
        RuleName::RangeLength,
        RuleName::GreaterThan,
        RuleName::GreaterThanEqualTo,
        RuleName::LessThan,
        RuleName::LessThanEqualTo,
        RuleName::InList,
        RuleName::EqualTo,
        RuleName::DifferentFrom,
        RuleName::Date,
        RuleName::Alpha,
        RuleName::AlphaNumeric,
        RuleName::AlphaDash,
        RuleName::AlphaSpace,
        RuleName::AlphaNumericSpace,
        RuleName::AlphaDashSpace,
        RuleName::Numeric,
        RuleName::Integer,
        RuleName::Decimal,
        RuleName::Natural,
        RuleName::NaturalNoZero,
        RuleName::Email,
        RuleName::IpAddress,
        RuleName::Base64,
        RuleName::Url,
        RuleName::Time,
        RuleName::Password,
        RuleName::CreditCard,
    ];

    /// Name as written in a declaration
    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::Required => "required",
            RuleName::RequiredOneOf => "required_one_of",
            RuleName::MinLength => "min_length",
            RuleName::MaxLength => "max_length",
            RuleName::ExactLength => "exact_length",
            RuleName::RangeLength => "range_length",
            RuleName::GreaterThan => "greater_than",
            RuleName::GreaterThanEqualTo => "greater_than_equal_to",
            RuleName::LessThan => "less_than",
            RuleName::LessThanEqualTo => "less_than_equal_to",
            RuleName::InList => "in_list",
            RuleName::EqualTo => "equal_to",
            RuleName::DifferentFrom => "different_from",
            RuleName::Date => "date",
            RuleName::Alpha => "alpha",
            RuleName::AlphaNumeric => "alpha_numeric",
            RuleName::AlphaDash => "alpha_dash",
            RuleName::AlphaSpace => "alpha_space",
            RuleName::AlphaNumericSpace => "alpha_numeric_space",
            RuleName::AlphaDashSpace => "alpha_dash_space",
            RuleName::Numeric => "numeric",
            RuleName::Integer => "integer",
            RuleName::Decimal => "decimal",
            RuleName::Natural => "natural",
            RuleName::NaturalNoZero => "natural_no_zero",
            RuleName::Email => "email",
            RuleName::IpAddress => "ip_address",
            RuleName::Base64 => "base64",
            RuleName::Url => "url",
            RuleName::Time => "time",
            RuleName::Password => "password",
            RuleName::CreditCard => "credit_card",
        }
    }

    /// Looks a rule up by its declaration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|rule| rule.as_str() == name)
    }

    /// Whether a declaration must give this rule a `[param]`
    pub fn takes_param(self) -> bool {
        matches!(
            self,
            RuleName::MinLength
                | RuleName::MaxLength
                | RuleName::ExactLength
                | RuleName::RangeLength
                | RuleName::GreaterThan
                | RuleName::GreaterThanEqualTo
                | RuleName::LessThan
                | RuleName::LessThanEqualTo
                | RuleName::InList
                | RuleName::EqualTo
                | RuleName::DifferentFrom
                | RuleName::Date
        )
    }

    /// The pattern-library entry backing this rule, if any
    pub fn pattern(self) -> Option<Pattern> {
        Pattern::ALL.iter().copied().find(|p| p.rule_name() == self)
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped view of a rule's parameter, shaped per rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum RuleParam {
    None,
    Scalar(String),
    Pair(String, String),
    List(Vec<String>),
}

/// Numeric bound of a comparison rule, kept alongside its declared text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub text: String,
}

/// Cross-field reference used by `equal_to` and `different_from`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub target: String,
    pub label: String,
}

/// One validated rule from a field declaration
///
/// Parameters are checked and typed when the declaration is parsed, so
/// evaluation never has to re-validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "param", rename_all = "snake_case")]
pub enum ParsedRule {
    Required,
    RequiredOneOf,
    MinLength(usize),
    MaxLength(usize),
    ExactLength(usize),
    RangeLength { min: usize, max: usize },
    GreaterThan(Threshold),
    GreaterThanEqualTo(Threshold),
    LessThan(Threshold),
    LessThanEqualTo(Threshold),
    InList(Vec<String>),
    EqualTo(FieldRef),
    DifferentFrom(FieldRef),
    Date(DateFormat),
    Pattern(Pattern),
}

impl ParsedRule {
    pub fn name(&self) -> RuleName {
        match self {
            ParsedRule::Required => RuleName::Required,
            ParsedRule::RequiredOneOf => RuleName::RequiredOneOf,
            ParsedRule::MinLength(_) => RuleName::MinLength,
            ParsedRule::MaxLength(_) => RuleName::MaxLength,
            ParsedRule::ExactLength(_) => RuleName::ExactLength,
            ParsedRule::RangeLength { .. } => RuleName::RangeLength,
            ParsedRule::GreaterThan(_) => RuleName::GreaterThan,
            ParsedRule::GreaterThanEqualTo(_) => RuleName::GreaterThanEqualTo,
            ParsedRule::LessThan(_) => RuleName::LessThan,
            ParsedRule::LessThanEqualTo(_) => RuleName::LessThanEqualTo,
            ParsedRule::InList(_) => RuleName::InList,
            ParsedRule::EqualTo(_) => RuleName::EqualTo,
            ParsedRule::DifferentFrom(_) => RuleName::DifferentFrom,
            ParsedRule::Date(_) => RuleName::Date,
            ParsedRule::Pattern(pattern) => pattern.rule_name(),
        }
    }

    pub fn param(&self) -> RuleParam {
        match self {
            ParsedRule::Required | ParsedRule::RequiredOneOf | ParsedRule::Pattern(_) => {
                RuleParam::None
            }
            ParsedRule::MinLength(n) | ParsedRule::MaxLength(n) | ParsedRule::ExactLength(n) => {
                RuleParam::Scalar(n.to_string())
            }
            ParsedRule::RangeLength { min, max } => {
                RuleParam::Pair(min.to_string(), max.to_string())
            }
            ParsedRule::GreaterThan(t)
            | ParsedRule::GreaterThanEqualTo(t)
            | ParsedRule::LessThan(t)
            | ParsedRule::LessThanEqualTo(t) => RuleParam::Scalar(t.text.clone()),
            ParsedRule::InList(items) => RuleParam::List(items.clone()),
            ParsedRule::EqualTo(r) | ParsedRule::DifferentFrom(r) => {
                RuleParam::Pair(r.target.clone(), r.label.clone())
            }
            ParsedRule::Date(format) => RuleParam::Pair(
                format.order.as_str().to_string(),
                format.separator.as_str().to_string(),
            ),
        }
    }

    /// Target field id for cross-field rules
    pub fn target(&self) -> Option<&str> {
        match self {
            ParsedRule::EqualTo(r) | ParsedRule::DifferentFrom(r) => Some(&r.target),
            _ => None,
        }
    }
}

/// Canonical declaration form; parsing it yields an equal rule
impl fmt::Display for ParsedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self.param() {
            RuleParam::None => write!(f, "{}", name),
            RuleParam::Scalar(value) => write!(f, "{}[{}]", name, value),
            RuleParam::Pair(first, second) => write!(f, "{}[{},{}]", name, first, second),
            RuleParam::List(items) => write!(f, "{}[{}]", name, items.join(",")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{DateOrder, DateSeparator};

    #[test]
    fn test_rule_names_round_trip() {
        for rule in RuleName::ALL {
            assert_eq!(RuleName::from_name(rule.as_str()), Some(rule));
        }
        assert_eq!(RuleName::from_name("requird"), None);
    }

    #[test]
    fn test_pattern_rules_take_no_param() {
        for pattern in Pattern::ALL {
            assert!(!pattern.rule_name().takes_param());
            assert_eq!(pattern.rule_name().pattern(), Some(pattern));
        }
        assert_eq!(RuleName::Required.pattern(), None);
    }

    #[test]
    fn test_param_shapes() {
        assert_eq!(ParsedRule::Required.param(), RuleParam::None);
        assert_eq!(
            ParsedRule::MinLength(5).param(),
            RuleParam::Scalar("5".to_string())
        );
        assert_eq!(
            ParsedRule::RangeLength { min: 2, max: 8 }.param(),
            RuleParam::Pair("2".to_string(), "8".to_string())
        );
        assert_eq!(
            ParsedRule::InList(vec!["a".to_string(), "b".to_string()]).param(),
            RuleParam::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_display_canonical_form() {
        let date = ParsedRule::Date(DateFormat {
            order: DateOrder::DayMonthYear,
            separator: DateSeparator::Dot,
        });
        assert_eq!(date.to_string(), "date[ddmmyyyy,.]");

        let equal = ParsedRule::EqualTo(FieldRef {
            target: "password".to_string(),
            label: "Password".to_string(),
        });
        assert_eq!(equal.to_string(), "equal_to[password,Password]");
        assert_eq!(equal.target(), Some("password"));

        assert_eq!(ParsedRule::Pattern(Pattern::Email).to_string(), "email");
    }
}
