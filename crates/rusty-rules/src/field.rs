// File: src/field.rs
// Purpose: Field declarations and the read-only form view rules are evaluated against

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::parser::{parse_declaration, parse_rule};
use crate::rule::ParsedRule;

/// Label used when a field declares none
pub const DEFAULT_LABEL: &str = "{label}";

/// Kind of input a field is bound to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Text-like inputs, textareas
    #[default]
    Text,
    Checkbox,
    Radio,
    Select,
}

impl FieldKind {
    /// Checkboxes and radios carry a checked state instead of a typed value
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// Raw field input, as written in a manifest or passed from JavaScript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub rules: String,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind: FieldKind::Text,
            group: None,
            rules: rules.into(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A field with its parsed, immutable rule list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDeclaration {
    id: String,
    label: String,
    kind: FieldKind,
    group: Option<String>,
    rules: Vec<ParsedRule>,
}

impl FieldDeclaration {
    /// Parses `spec` and resolves cross-field targets with `is_known`
    pub fn from_spec<F>(spec: &FieldSpec, is_known: F) -> Result<Self, Vec<ConfigError>>
    where
        F: Fn(&str) -> bool,
    {
        let (rules, mut errors) = match parse_declaration(&spec.id, &spec.rules) {
            Ok(rules) => (rules, Vec::new()),
            Err(errors) => (parse_valid(&spec.rules), errors),
        };

        errors.extend(rules.iter().filter_map(|rule| {
            let target = rule.target()?;
            (!is_known(target)).then(|| ConfigError::UnknownTarget {
                field: spec.id.clone(),
                rule: rule.name(),
                target: target.to_string(),
            })
        }));
        if !errors.is_empty() {
            return Err(errors);
        }

        let label = spec
            .label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_LABEL)
            .to_string();

        tracing::debug!(field = %spec.id, rules = rules.len(), "parsed field declaration");

        Ok(Self {
            id: spec.id.clone(),
            label,
            kind: spec.kind,
            group: spec.group.clone(),
            rules,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Form-level group name, falling back to the field id
    pub fn group(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.id)
    }

    pub fn rules(&self) -> &[ParsedRule] {
        &self.rules
    }
}

/// Tokens of `declaration` that parse, skipping the broken ones
fn parse_valid(declaration: &str) -> Vec<ParsedRule> {
    declaration
        .split('|')
        .filter(|token| !token.trim().is_empty())
        .filter_map(|token| parse_rule(token).ok())
        .collect()
}

/// Current state of one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

/// Recorded input of one field: a bare value or a full `{ value, checked }` state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Value(String),
    State(FieldState),
}

/// One member of a checkbox or radio group, in form order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub checked: bool,
}

/// Read-only view of a form at evaluation time
pub trait FormSnapshot {
    /// State of the field with `id`, if it exists
    fn field(&self, id: &str) -> Option<FieldState>;

    /// Members sharing the group `name`, in form order
    fn group(&self, name: &str) -> Vec<GroupMember>;
}

/// In-memory [`FormSnapshot`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    states: HashMap<String, FieldState>,
    #[serde(default)]
    groups: Vec<GroupLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GroupLayout {
    group: String,
    id: String,
    label: String,
    kind: FieldKind,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out group membership for every declaration, in order
    pub fn for_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a FieldDeclaration>,
    {
        let mut values = Self::new();
        for field in fields {
            values.add_member(field.group(), field.id(), field.label(), field.kind());
        }
        values
    }

    pub fn with_value(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(id, value);
        self
    }

    pub fn with_checked(mut self, id: impl Into<String>, checked: bool) -> Self {
        self.set_checked(id, checked);
        self
    }

    pub fn set_value(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.states.entry(id.into()).or_default().value = value.into();
    }

    pub fn set_checked(&mut self, id: impl Into<String>, checked: bool) {
        self.states.entry(id.into()).or_default().checked = checked;
    }

    pub fn set(&mut self, id: impl Into<String>, state: FieldState) {
        self.states.insert(id.into(), state);
    }

    /// Applies recorded inputs on top of the current state
    pub fn apply<I, K>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = (K, FieldInput)>,
        K: Into<String>,
    {
        for (id, input) in inputs {
            match input {
                FieldInput::Value(value) => self.set_value(id, value),
                FieldInput::State(state) => self.set(id, state),
            }
        }
    }

    /// Registers `id` as the next member of `group`
    pub fn add_member(
        &mut self,
        group: impl Into<String>,
        id: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
    ) {
        let group = group.into();
        let id = id.into();
        if self.groups.iter().any(|m| m.group == group && m.id == id) {
            return;
        }
        self.groups.push(GroupLayout {
            group,
            id,
            label: label.into(),
            kind,
        });
    }
}

impl FormSnapshot for FormValues {
    fn field(&self, id: &str) -> Option<FieldState> {
        self.states.get(id).cloned()
    }

    fn group(&self, name: &str) -> Vec<GroupMember> {
        self.groups
            .iter()
            .filter(|m| m.group == name)
            .map(|m| GroupMember {
                id: m.id.clone(),
                label: m.label.clone(),
                kind: m.kind,
                checked: self.states.get(&m.id).map(|s| s.checked).unwrap_or(false),
            })
            .collect()
    }
}
