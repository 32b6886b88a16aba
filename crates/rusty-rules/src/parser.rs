//! Rule declaration parser
//!
//! Turns a declaration such as `required|min_length[5]|equal_to[password,Password]`
//! into an ordered list of [`ParsedRule`]s. Parameters are validated here,
//! once, so a bad declaration is reported at construction time and never
//! reaches evaluation.

use crate::date::DateFormat;
use crate::error::{ConfigError, RuleError};
use crate::patterns::{is_natural, is_numeric};
use crate::rule::{FieldRef, ParsedRule, RuleName, Threshold};

/// Parses every rule of one field's declaration
///
/// Blank tokens (e.g. from a trailing `|`) are skipped. All malformed
/// tokens are reported, not just the first.
///
/// # Examples
/// ```
/// use rusty_rules::parser::parse_declaration;
/// use rusty_rules::rule::ParsedRule;
///
/// let rules = parse_declaration("username", "required|min_length[5]").unwrap();
/// assert_eq!(rules, vec![ParsedRule::Required, ParsedRule::MinLength(5)]);
///
/// let errors = parse_declaration("username", "range_length[10,5]").unwrap_err();
/// assert_eq!(errors.len(), 1);
/// ```
pub fn parse_declaration(
    field_id: &str,
    declaration: &str,
) -> Result<Vec<ParsedRule>, Vec<ConfigError>> {
    let (rules, errors): (Vec<_>, Vec<_>) = declaration
        .split('|')
        .filter(|token| !token.trim().is_empty())
        .map(|token| {
            parse_rule(token).map_err(|source| ConfigError::Rule {
                field: field_id.to_string(),
                rule: rule_label(token),
                source,
            })
        })
        .partition(Result::is_ok);

    if errors.is_empty() {
        Ok(rules.into_iter().filter_map(Result::ok).collect())
    } else {
        Err(errors.into_iter().filter_map(Result::err).collect())
    }
}

/// Parses a single `name` or `name[params]` token
pub fn parse_rule(token: &str) -> Result<ParsedRule, RuleError> {
    let token = token.trim();

    let Some(open) = token.find('[') else {
        let rule = lookup(&strip_whitespace(token))?;
        return bare_rule(rule);
    };

    let params = token[open + 1..]
        .strip_suffix(']')
        .filter(|inner| !inner.contains(|c: char| c == '[' || c == ']'))
        .ok_or_else(|| RuleError::Malformed(token.to_string()))?;

    let rule = lookup(&strip_whitespace(&token[..open]))?;
    parse_params(rule, params)
}

fn lookup(name: &str) -> Result<RuleName, RuleError> {
    RuleName::from_name(name).ok_or(RuleError::UnknownRule)
}

/// Rules written without brackets
fn bare_rule(rule: RuleName) -> Result<ParsedRule, RuleError> {
    match rule {
        RuleName::Required => Ok(ParsedRule::Required),
        RuleName::RequiredOneOf => Ok(ParsedRule::RequiredOneOf),
        other => other
            .pattern()
            .map(ParsedRule::Pattern)
            .ok_or(RuleError::MissingParam),
    }
}

fn parse_params(rule: RuleName, raw: &str) -> Result<ParsedRule, RuleError> {
    let invalid = || RuleError::InvalidParam(raw.trim().to_string());

    match rule {
        RuleName::Date => DateFormat::parse(&strip_whitespace(raw))
            .map(ParsedRule::Date)
            .ok_or_else(invalid),

        RuleName::MinLength => parse_length(raw).map(ParsedRule::MinLength).ok_or_else(invalid),
        RuleName::MaxLength => parse_length(raw).map(ParsedRule::MaxLength).ok_or_else(invalid),
        RuleName::ExactLength => parse_length(raw)
            .map(ParsedRule::ExactLength)
            .ok_or_else(invalid),

        RuleName::RangeLength => {
            let compact = strip_whitespace(raw);
            let (min, max) = compact.split_once(',').ok_or_else(invalid)?;
            let min = parse_length(min).ok_or_else(invalid)?;
            let max = parse_length(max).ok_or_else(invalid)?;
            if min < max {
                Ok(ParsedRule::RangeLength { min, max })
            } else {
                Err(invalid())
            }
        }

        RuleName::GreaterThan
        | RuleName::GreaterThanEqualTo
        | RuleName::LessThan
        | RuleName::LessThanEqualTo => {
            let threshold = parse_threshold(raw).ok_or_else(invalid)?;
            Ok(match rule {
                RuleName::GreaterThan => ParsedRule::GreaterThan(threshold),
                RuleName::GreaterThanEqualTo => ParsedRule::GreaterThanEqualTo(threshold),
                RuleName::LessThan => ParsedRule::LessThan(threshold),
                _ => ParsedRule::LessThanEqualTo(threshold),
            })
        }

        RuleName::EqualTo | RuleName::DifferentFrom => {
            let field_ref = parse_field_ref(raw).ok_or_else(invalid)?;
            Ok(if rule == RuleName::EqualTo {
                ParsedRule::EqualTo(field_ref)
            } else {
                ParsedRule::DifferentFrom(field_ref)
            })
        }

        RuleName::InList => {
            let items: Vec<String> = raw.split(',').map(|item| item.trim().to_string()).collect();
            if items.iter().all(String::is_empty) {
                Err(invalid())
            } else {
                Ok(ParsedRule::InList(items))
            }
        }

        _ => Err(RuleError::UnexpectedParam),
    }
}

fn parse_length(raw: &str) -> Option<usize> {
    let compact = strip_whitespace(raw);
    if is_natural(&compact) {
        compact.parse().ok()
    } else {
        None
    }
}

fn parse_threshold(raw: &str) -> Option<Threshold> {
    let text = strip_whitespace(raw);
    if !is_numeric(&text) {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    Some(Threshold { value, text })
}

/// `target,label`: exactly two non-empty parts
fn parse_field_ref(raw: &str) -> Option<FieldRef> {
    let mut parts = raw.split(',').map(str::trim);
    let target = parts.next().filter(|s| !s.is_empty())?;
    let label = parts.next().filter(|s| !s.is_empty())?;
    if parts.next().is_some() {
        return None;
    }
    Some(FieldRef {
        target: target.to_string(),
        label: label.to_string(),
    })
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Name used when reporting a broken token
fn rule_label(token: &str) -> String {
    let head = token.split('[').next().unwrap_or(token);
    let name = strip_whitespace(head);
    if name.is_empty() {
        token.trim().to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{DateOrder, DateSeparator};
    use crate::patterns::Pattern;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_rules() {
        assert_eq!(parse_rule("required"), Ok(ParsedRule::Required));
        assert_eq!(parse_rule(" required_one_of "), Ok(ParsedRule::RequiredOneOf));
        assert_eq!(parse_rule("email"), Ok(ParsedRule::Pattern(Pattern::Email)));
        assert_eq!(parse_rule("alpha _dash"), Ok(ParsedRule::Pattern(Pattern::AlphaDash)));
    }

    #[test]
    fn test_bare_rule_that_needs_a_param() {
        assert_eq!(parse_rule("min_length"), Err(RuleError::MissingParam));
        assert_eq!(parse_rule("in_list"), Err(RuleError::MissingParam));
    }

    #[test]
    fn test_unknown_rules() {
        assert_eq!(parse_rule("requird"), Err(RuleError::UnknownRule));
        assert_eq!(parse_rule("between[1,2]"), Err(RuleError::UnknownRule));
    }

    #[test]
    fn test_param_on_rule_without_params() {
        assert_eq!(parse_rule("required[yes]"), Err(RuleError::UnexpectedParam));
        assert_eq!(parse_rule("email[x]"), Err(RuleError::UnexpectedParam));
    }

    #[test]
    fn test_malformed_brackets() {
        assert!(matches!(parse_rule("min_length[5"), Err(RuleError::Malformed(_))));
        assert!(matches!(parse_rule("min_length[5]x"), Err(RuleError::Malformed(_))));
        assert!(matches!(parse_rule("in_list[a[b]]"), Err(RuleError::Malformed(_))));
    }

    #[test]
    fn test_length_params() {
        assert_eq!(parse_rule("min_length[ 5 ]"), Ok(ParsedRule::MinLength(5)));
        assert_eq!(parse_rule("max_length[10]"), Ok(ParsedRule::MaxLength(10)));
        assert_eq!(parse_rule("exact_length[0]"), Ok(ParsedRule::ExactLength(0)));
        assert!(parse_rule("min_length[-1]").is_err());
        assert!(parse_rule("min_length[1.5]").is_err());
        assert!(parse_rule("min_length[]").is_err());
    }

    #[test]
    fn test_range_length() {
        assert_eq!(
            parse_rule("range_length[2, 8]"),
            Ok(ParsedRule::RangeLength { min: 2, max: 8 })
        );
        assert_eq!(
            parse_rule("range_length[10,5]"),
            Err(RuleError::InvalidParam("10,5".to_string()))
        );
        assert!(parse_rule("range_length[5,5]").is_err());
        assert!(parse_rule("range_length[5]").is_err());
        assert!(parse_rule("range_length[1,2,3]").is_err());
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(
            parse_rule("greater_than[-2.5]"),
            Ok(ParsedRule::GreaterThan(Threshold {
                value: -2.5,
                text: "-2.5".to_string()
            }))
        );
        assert_eq!(
            parse_rule("less_than_equal_to[ 1 00 ]"),
            Ok(ParsedRule::LessThanEqualTo(Threshold {
                value: 100.0,
                text: "100".to_string()
            }))
        );
        assert!(parse_rule("less_than[ten]").is_err());
        assert!(parse_rule("greater_than_equal_to[1,000]").is_err());
    }

    #[test]
    fn test_date_params() {
        assert_eq!(
            parse_rule("date[yyyymmdd, -]"),
            Ok(ParsedRule::Date(DateFormat {
                order: DateOrder::YearMonthDay,
                separator: DateSeparator::Dash,
            }))
        );
        assert!(parse_rule("date[mmddyyyy,/]").is_err());
        assert!(parse_rule("date[ddmmyyyy]").is_err());
    }

    #[test]
    fn test_field_refs() {
        assert_eq!(
            parse_rule("equal_to[password, Password]"),
            Ok(ParsedRule::EqualTo(FieldRef {
                target: "password".to_string(),
                label: "Password".to_string(),
            }))
        );
        assert!(parse_rule("different_from[password]").is_err());
        assert!(parse_rule("different_from[a,b,c]").is_err());
        assert!(parse_rule("equal_to[,Label]").is_err());
    }

    #[test]
    fn test_in_list() {
        assert_eq!(
            parse_rule("in_list[red, green ,blue]"),
            Ok(ParsedRule::InList(vec![
                "red".to_string(),
                "green".to_string(),
                "blue".to_string()
            ]))
        );
        assert!(parse_rule("in_list[]").is_err());
        assert!(parse_rule("in_list[ , ]").is_err());
    }

    #[test]
    fn test_declaration_keeps_order_and_skips_blanks() {
        let rules = parse_declaration("age", "required| |integer|greater_than[17]|").unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0], ParsedRule::Required);
        assert_eq!(rules[1], ParsedRule::Pattern(Pattern::Integer));
        assert_eq!(rules[2].name(), RuleName::GreaterThan);
    }

    #[test]
    fn test_declaration_collects_every_error() {
        let errors = parse_declaration("name", "required|min_length[x]|bogus|max_length[3").unwrap_err();
        let rules: Vec<_> = errors
            .iter()
            .map(|e| match e {
                ConfigError::Rule { rule, field, .. } => {
                    assert_eq!(field, "name");
                    rule.clone()
                }
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(rules, vec!["min_length", "bogus", "max_length"]);
    }

    #[test]
    fn test_canonical_form_reparses() {
        for declaration in [
            "required",
            "min_length[ 05 ]",
            "range_length[1,20]",
            "greater_than_equal_to[-0.5]",
            "in_list[a, b,c]",
            "equal_to[pw , Your Password]",
            "date[ddmmyyyy,.]",
            "credit_card",
        ] {
            let rule = parse_rule(declaration).unwrap();
            assert_eq!(parse_rule(&rule.to_string()), Ok(rule));
        }
    }
}
