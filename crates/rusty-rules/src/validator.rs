// File: src/validator.rs
// Purpose: Construction of a validator from raw field specs, collecting every configuration error

use std::collections::HashSet;

use crate::engine::{evaluate, FieldVerdict};
use crate::error::{ConfigError, ConfigErrors};
use crate::field::{FieldDeclaration, FieldSpec, FormSnapshot, FormValues};
use crate::message::MessageCatalog;
use crate::options::DisplayOptions;
use crate::report::{evaluate_form, FormReport};

/// Parsed, immutable field declarations plus the messages they render with
///
/// A `Validator` only exists when its whole configuration is valid. It is
/// never mutated after construction, so one instance can serve any number
/// of evaluations, from any thread.
#[derive(Debug, Clone)]
pub struct Validator {
    fields: Vec<FieldDeclaration>,
    messages: MessageCatalog,
    options: Option<DisplayOptions>,
}

impl Validator {
    /// Builds a validator from field specs and a message catalog
    ///
    /// # Examples
    /// ```
    /// use rusty_rules::{FieldSpec, MessageCatalog, Validator};
    ///
    /// let fields = vec![
    ///     FieldSpec::new("password", "required|min_length[8]").label("Password"),
    ///     FieldSpec::new("confirm", "equal_to[password,Password]").label("Confirmation"),
    /// ];
    /// let validator = Validator::new(fields, MessageCatalog::default()).unwrap();
    /// assert_eq!(validator.fields().len(), 2);
    ///
    /// let broken = vec![FieldSpec::new("age", "range_length[10,5]|bogus")];
    /// let errors = Validator::new(broken, MessageCatalog::default()).unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// ```
    pub fn new<I>(fields: I, messages: MessageCatalog) -> Result<Self, ConfigErrors>
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        Self::builder().fields(fields).messages(messages).build()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn options(&self) -> Option<&DisplayOptions> {
        self.options.as_ref()
    }

    /// Evaluates one declared field; `None` when no field has this id
    pub fn evaluate_field<S>(&self, field_id: &str, ctx: &S) -> Option<FieldVerdict>
    where
        S: FormSnapshot + ?Sized,
    {
        self.field(field_id)
            .map(|field| evaluate(field, ctx, &self.messages))
    }

    /// Evaluates every field in declaration order
    pub fn evaluate_form<S>(&self, ctx: &S) -> FormReport
    where
        S: FormSnapshot + ?Sized,
    {
        evaluate_form(&self.fields, ctx, &self.messages)
    }

    /// Empty form values with this validator's group layout
    pub fn snapshot(&self) -> FormValues {
        FormValues::for_fields(&self.fields)
    }
}

/// Collects construction inputs for a [`Validator`]
#[derive(Debug, Clone, Default)]
pub struct ValidatorBuilder {
    specs: Vec<FieldSpec>,
    messages: Option<MessageCatalog>,
    options: Option<DisplayOptions>,
}

impl ValidatorBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn fields<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        self.specs.extend(specs);
        self
    }

    /// Message catalog (default: built-in English messages)
    pub fn messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Display options, validated along with the fields
    pub fn options(mut self, options: DisplayOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Parses every field and checks every input, reporting all problems at once
    pub fn build(self) -> Result<Validator, ConfigErrors> {
        let messages = self.messages.unwrap_or_default();
        let mut errors = Vec::new();

        if let Some(options) = &self.options {
            errors.extend(options.validate());
        }

        let mut seen = HashSet::new();
        for spec in &self.specs {
            if spec.id.trim().is_empty() {
                errors.push(ConfigError::EmptyFieldId);
            } else if !seen.insert(spec.id.as_str()) {
                errors.push(ConfigError::DuplicateField(spec.id.clone()));
            }
        }

        let known: HashSet<&str> = self.specs.iter().map(|s| s.id.as_str()).collect();
        let mut fields = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            match FieldDeclaration::from_spec(spec, |id| known.contains(id)) {
                Ok(field) => {
                    for rule in field.rules() {
                        errors.extend(messages.check_rule(field.id(), rule));
                    }
                    fields.push(field);
                }
                Err(field_errors) => errors.extend(field_errors),
            }
        }

        if !errors.is_empty() {
            for error in &errors {
                tracing::warn!(%error, "invalid form configuration");
            }
            return Err(ConfigErrors::new(dedup(errors)));
        }

        tracing::debug!(fields = fields.len(), "validator ready");
        Ok(Validator {
            fields,
            messages,
            options: self.options,
        })
    }
}

/// The same broken template is reported once, however many rules use it
fn dedup(errors: Vec<ConfigError>) -> Vec<ConfigError> {
    let mut unique: Vec<ConfigError> = Vec::with_capacity(errors.len());
    for error in errors {
        if !unique.contains(&error) {
            unique.push(error);
        }
    }
    unique
}
