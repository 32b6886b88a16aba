// File: src/patterns.rs
// Purpose: Fixed pattern library backing the format rules (alpha, email, url, ...)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rule::RuleName;

static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]*$").unwrap());

static ALPHA_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static ALPHA_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_\-]+$").unwrap());

static ALPHA_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z ]*$").unwrap());

static ALPHA_NUMERIC_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap());

static ALPHA_DASH_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_\- ]+$").unwrap());

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]+$").unwrap());

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").unwrap());

static NATURAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

static NATURAL_NO_ZERO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^[-a-z0-9~!$%^&*_=+\}\{'?]+(\.[-a-z0-9~!$%^&*_=+\}\{'?]+)*@",
        r"([a-z0-9_][-a-z0-9_]*(\.[-a-z0-9_]+)*\.",
        r"(aero|arpa|biz|com|coop|edu|gov|info|int|mil|museum|name|net|org|pro|travel|mobi|[a-z][a-z])",
        r"|([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}))",
        r"(:[0-9]{1,5})?$",
    ))
    .unwrap()
});

static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[0-9]{1,2})\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[0-9]{1,2})$",
    )
    .unwrap()
});

static BASE64: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9/+=]+$").unwrap());

// The `host` group is checked against private ranges in `is_url`.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?:https?|ftp)://)?",
        r"(?P<host>(?:[1-9][0-9]?|1[0-9][0-9]|2[01][0-9]|22[0-3])",
        r"(?:\.(?:1?[0-9]{1,2}|2[0-4][0-9]|25[0-5])){2}",
        r"\.(?:[1-9][0-9]?|1[0-9][0-9]|2[0-4][0-9]|25[0-4])",
        r"|(?:(?:[a-z\x{a1}-\x{ffff}0-9]-*)*[a-z\x{a1}-\x{ffff}0-9]+)",
        r"(?:\.(?:[a-z\x{a1}-\x{ffff}0-9]-*)*[a-z\x{a1}-\x{ffff}0-9]+)*",
        r"\.[a-z\x{a1}-\x{ffff}]{2,})",
        r"(?::[0-9]{2,5})?(?:/\S*)?$",
    ))
    .unwrap()
});

// Loopback, link-local and RFC 1918 prefixes; unanchored at the end so
// hostnames such as `10.0.0.1.com` are caught too
static PRIVATE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:10|127)(?:\.[0-9]{1,3}){3}",
        r"|(?:169\.254|192\.168)(?:\.[0-9]{1,3}){2}",
        r"|172\.(?:1[6-9]|2[0-9]|3[01])(?:\.[0-9]{1,3}){2})",
    ))
    .unwrap()
});

static TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]$").unwrap());

static PASSWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9$@!%*?&]{6,}$").unwrap());

static CREDIT_CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:4[0-9]{12}(?:[0-9]{3})?",
        r"|5[1-5][0-9]{14}",
        r"|6(?:011|5[0-9][0-9])[0-9]{12}",
        r"|3[47][0-9]{13}",
        r"|3(?:0[0-5]|[68][0-9])[0-9]{11}",
        r"|(?:2131|1800|35[0-9]{3})[0-9]{11})$",
    ))
    .unwrap()
});

const PASSWORD_SYMBOLS: &[char] = &['$', '@', '!', '%', '*', '?', '&'];

/// Format rules answered by a fixed predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
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

impl Pattern {
    pub const ALL: [Pattern; 18] = [
        Pattern::Alpha,
        Pattern::AlphaNumeric,
        Pattern::AlphaDash,
        Pattern::AlphaSpace,
        Pattern::AlphaNumericSpace,
        Pattern::AlphaDashSpace,
        Pattern::Numeric,
        Pattern::Integer,
        Pattern::Decimal,
        Pattern::Natural,
        Pattern::NaturalNoZero,
        Pattern::Email,
        Pattern::IpAddress,
        Pattern::Base64,
        Pattern::Url,
        Pattern::Time,
        Pattern::Password,
        Pattern::CreditCard,
    ];

    pub fn rule_name(self) -> RuleName {
        match self {
            Pattern::Alpha => RuleName::Alpha,
            Pattern::AlphaNumeric => RuleName::AlphaNumeric,
            Pattern::AlphaDash => RuleName::AlphaDash,
            Pattern::AlphaSpace => RuleName::AlphaSpace,
            Pattern::AlphaNumericSpace => RuleName::AlphaNumericSpace,
            Pattern::AlphaDashSpace => RuleName::AlphaDashSpace,
            Pattern::Numeric => RuleName::Numeric,
            Pattern::Integer => RuleName::Integer,
            Pattern::Decimal => RuleName::Decimal,
            Pattern::Natural => RuleName::Natural,
            Pattern::NaturalNoZero => RuleName::NaturalNoZero,
            Pattern::Email => RuleName::Email,
            Pattern::IpAddress => RuleName::IpAddress,
            Pattern::Base64 => RuleName::Base64,
            Pattern::Url => RuleName::Url,
            Pattern::Time => RuleName::Time,
            Pattern::Password => RuleName::Password,
            Pattern::CreditCard => RuleName::CreditCard,
        }
    }

    /// Password and credit card failures use a fixed message with no field name
    pub fn has_static_message(self) -> bool {
        matches!(self, Pattern::Password | Pattern::CreditCard)
    }

    /// Tests a value against this pattern
    ///
    /// Pure function: no side effects, deterministic. Empty input is only
    /// accepted by `alpha` and `alpha_space`; callers apply the empty-value
    /// exemption themselves.
    pub fn matches(self, value: &str) -> bool {
        match self {
            Pattern::Alpha => ALPHA.is_match(value),
            Pattern::AlphaNumeric => ALPHA_NUMERIC.is_match(value),
            Pattern::AlphaDash => ALPHA_DASH.is_match(value),
            Pattern::AlphaSpace => ALPHA_SPACE.is_match(value),
            Pattern::AlphaNumericSpace => ALPHA_NUMERIC_SPACE.is_match(value),
            Pattern::AlphaDashSpace => ALPHA_DASH_SPACE.is_match(value),
            Pattern::Numeric => NUMERIC.is_match(value),
            Pattern::Integer => INTEGER.is_match(value),
            Pattern::Decimal => DECIMAL.is_match(value),
            Pattern::Natural => NATURAL.is_match(value),
            Pattern::NaturalNoZero => NATURAL_NO_ZERO.is_match(value),
            Pattern::Email => EMAIL.is_match(value),
            Pattern::IpAddress => IP_ADDRESS.is_match(value),
            Pattern::Base64 => BASE64.is_match(value),
            Pattern::Url => is_url(value),
            Pattern::Time => TIME.is_match(value),
            Pattern::Password => is_password(value),
            Pattern::CreditCard => CREDIT_CARD.is_match(value),
        }
    }
}

/// Shorthand for [`Pattern::matches`]
pub fn matches(pattern: Pattern, value: &str) -> bool {
    pattern.matches(value)
}

/// Signed integer or decimal, as accepted by the comparison rules
pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

/// Non-negative integer, as accepted by the length rules
pub fn is_natural(value: &str) -> bool {
    NATURAL.is_match(value)
}

fn is_url(value: &str) -> bool {
    let Some(caps) = URL.captures(value) else {
        return false;
    };

    caps.name("host")
        .map_or(false, |host| !PRIVATE_HOST.is_match(host.as_str()))
}

fn is_password(value: &str) -> bool {
    PASSWORD.is_match(value)
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(&c))
}
