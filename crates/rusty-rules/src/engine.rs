//! Field evaluator
//!
//! Runs one field's rules in declared order against a [`FormSnapshot`] and
//! returns a single verdict. The first violated rule wins; evaluation
//! itself never fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::field::{FieldDeclaration, FieldKind, FormSnapshot};
use crate::message::{MessageCatalog, MessageKey};
use crate::patterns::is_numeric;
use crate::rule::{ParsedRule, RuleName, Threshold};

/// A violated rule, reported against one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    pub field_id: String,
    pub rule: RuleName,
    pub message: String,
}

/// A field whose rules all passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResult {
    pub field_id: String,
}

/// Outcome of evaluating one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FieldVerdict {
    Success(SuccessResult),
    Error(ErrorResult),
}

impl FieldVerdict {
    pub fn is_success(&self) -> bool {
        matches!(self, FieldVerdict::Success(_))
    }

    /// Id the verdict is reported against
    pub fn field_id(&self) -> &str {
        match self {
            FieldVerdict::Success(s) => &s.field_id,
            FieldVerdict::Error(e) => &e.field_id,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            FieldVerdict::Error(e) => Some(e),
            FieldVerdict::Success(_) => None,
        }
    }
}

/// Violation found while walking the rule list
struct Violation {
    rule: RuleName,
    key: MessageKey,
    field_id: String,
    values: HashMap<&'static str, String>,
}

impl Violation {
    fn new(rule: RuleName, key: MessageKey, field_id: &str, label: &str) -> Self {
        Self {
            rule,
            key,
            field_id: field_id.to_string(),
            values: HashMap::from([("field", label.to_string())]),
        }
    }

    fn of(rule: &ParsedRule, decl: &FieldDeclaration) -> Self {
        Self::new(rule.name(), MessageKey::Rule(rule.name()), decl.id(), decl.label())
    }

    fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    fn render(self, messages: &MessageCatalog) -> ErrorResult {
        ErrorResult {
            field_id: self.field_id,
            message: messages.render(self.key, &self.values),
            rule: self.rule,
        }
    }
}

/// Evaluates `decl`'s rules against `ctx`
///
/// # Examples
/// ```
/// use rusty_rules::engine::{evaluate, FieldVerdict};
/// use rusty_rules::field::{FieldDeclaration, FieldSpec, FormValues};
/// use rusty_rules::message::MessageCatalog;
///
/// let spec = FieldSpec::new("username", "required|min_length[5]").label("Username");
/// let decl = FieldDeclaration::from_spec(&spec, |_| true).unwrap();
/// let ctx = FormValues::new().with_value("username", "ab");
///
/// let FieldVerdict::Error(error) = evaluate(&decl, &ctx, &MessageCatalog::default()) else {
///     panic!("expected an error");
/// };
/// assert_eq!(error.message, "Username requires a minimum of 5 characters");
/// ```
pub fn evaluate<S>(decl: &FieldDeclaration, ctx: &S, messages: &MessageCatalog) -> FieldVerdict
where
    S: FormSnapshot + ?Sized,
{
    let state = ctx.field(decl.id()).unwrap_or_default();
    let raw = state.value.as_str();
    let value = raw.trim();

    for rule in decl.rules() {
        if let Some(violation) = check(rule, decl, ctx, raw, value, state.checked) {
            tracing::trace!(field = %decl.id(), rule = %violation.rule, "rule violated");
            return FieldVerdict::Error(violation.render(messages));
        }
    }

    FieldVerdict::Success(SuccessResult {
        field_id: decl.id().to_string(),
    })
}

fn check<S>(
    rule: &ParsedRule,
    decl: &FieldDeclaration,
    ctx: &S,
    raw: &str,
    value: &str,
    checked: bool,
) -> Option<Violation>
where
    S: FormSnapshot + ?Sized,
{
    match rule {
        ParsedRule::Required => {
            let missing = if decl.kind().is_checkable() {
                !checked
            } else {
                value.is_empty()
            };
            missing.then(|| Violation::of(rule, decl))
        }
        ParsedRule::RequiredOneOf => check_group(decl, ctx),

        // Every other rule only looks at filled-in fields
        _ if value.is_empty() => None,

        ParsedRule::MinLength(min) => {
            (char_count(value) < *min).then(|| Violation::of(rule, decl).with("min", min.to_string()))
        }
        ParsedRule::MaxLength(max) => {
            (char_count(value) > *max).then(|| Violation::of(rule, decl).with("max", max.to_string()))
        }
        ParsedRule::ExactLength(exact) => (char_count(value) != *exact)
            .then(|| Violation::of(rule, decl).with("exact", exact.to_string())),
        ParsedRule::RangeLength { min, max } => {
            let len = char_count(value);
            (len < *min || len > *max).then(|| {
                Violation::of(rule, decl)
                    .with("min", min.to_string())
                    .with("max", max.to_string())
            })
        }

        ParsedRule::GreaterThan(t) => compare(rule, decl, value, t, |v, l| v > l),
        ParsedRule::GreaterThanEqualTo(t) => compare(rule, decl, value, t, |v, l| v >= l),
        ParsedRule::LessThan(t) => compare(rule, decl, value, t, |v, l| v < l),
        ParsedRule::LessThanEqualTo(t) => compare(rule, decl, value, t, |v, l| v <= l),

        ParsedRule::InList(items) => (!items.iter().any(|item| item == value))
            .then(|| Violation::of(rule, decl).with("values", items.join(", "))),

        ParsedRule::EqualTo(r) => (raw != target_value(ctx, &r.target))
            .then(|| Violation::of(rule, decl).with("target", r.label.clone())),
        ParsedRule::DifferentFrom(r) => (raw == target_value(ctx, &r.target))
            .then(|| Violation::of(rule, decl).with("target", r.label.clone())),

        ParsedRule::Date(format) => {
            (!format.matches(raw)).then(|| Violation::of(rule, decl).with("format", format.layout()))
        }

        ParsedRule::Pattern(pattern) => (!pattern.matches(value)).then(|| Violation::of(rule, decl)),
    }
}

/// `required_one_of`: at least one member of the field's group is checked
///
/// Reported against the group's first member, whose kind picks the message.
fn check_group<S>(decl: &FieldDeclaration, ctx: &S) -> Option<Violation>
where
    S: FormSnapshot + ?Sized,
{
    let members = ctx.group(decl.group());

    let (kind, id, label) = match members.first() {
        Some(first) => (first.kind, first.id.as_str(), first.label.as_str()),
        None => (decl.kind(), decl.id(), decl.label()),
    };

    let key = match kind {
        FieldKind::Checkbox => MessageKey::RequiredCheckbox,
        FieldKind::Radio => MessageKey::RequiredRadio,
        _ => return None,
    };

    let any_checked = if members.is_empty() {
        ctx.field(decl.id()).map(|s| s.checked).unwrap_or(false)
    } else {
        members.iter().any(|m| m.checked)
    };

    (!any_checked).then(|| Violation::new(RuleName::RequiredOneOf, key, id, label))
}

fn compare(
    rule: &ParsedRule,
    decl: &FieldDeclaration,
    value: &str,
    limit: &Threshold,
    holds: impl Fn(f64, f64) -> bool,
) -> Option<Violation> {
    let parsed = is_numeric(value).then(|| value.parse::<f64>().ok()).flatten();
    match parsed {
        None => Some(Violation::new(rule.name(), MessageKey::IsNan, decl.id(), decl.label())),
        Some(v) if holds(v, limit.value) => None,
        Some(_) => Some(Violation::of(rule, decl).with("number", limit.text.clone())),
    }
}

fn target_value<S>(ctx: &S, target: &str) -> String
where
    S: FormSnapshot + ?Sized,
{
    ctx.field(target).map(|s| s.value).unwrap_or_default()
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}
