//! Rusty-Rules WASM
//!
//! WebAssembly bindings for rusty-rules. The browser glue reads field
//! values and renders verdicts; declarations are parsed and evaluated here.

use std::collections::HashMap;

use rusty_rules::field::FieldInput;
use rusty_rules::message::MessageKey;
use rusty_rules::parser::parse_declaration;
use rusty_rules::{
    DisplayOptions, FieldSpec, FormValues, MessageCatalog, ParsedRule, RuleName, Validator,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// A supported rule, as listed for tooling
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleInfo {
    pub name: &'static str,
    pub takes_param: bool,
    pub message: Option<String>,
}

/// Validator bound to one form
///
/// # Example (JavaScript)
/// ```javascript
/// const validator = new FormValidator(
///     [{ id: 'email', label: 'Email', rules: 'required|email' }],
///     null,
///     { formId: 'signup', submitButtonId: 'send', onBlurChecking: true },
/// );
/// const report = validator.evaluateForm({ email: 'nobody@' });
/// // report.errors[0] => { fieldId: 'email', rule: 'email', message: '...' }
/// ```
#[wasm_bindgen]
pub struct FormValidator {
    inner: Validator,
}

#[wasm_bindgen]
impl FormValidator {
    /// Parses every field declaration; throws a message listing all configuration errors
    #[wasm_bindgen(constructor)]
    pub fn new(fields: JsValue, messages: JsValue, options: JsValue) -> Result<FormValidator, JsValue> {
        let fields: Vec<FieldSpec> = serde_wasm_bindgen::from_value(fields)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse fields: {}", e)))?;

        let messages: Option<HashMap<String, String>> = optional(messages)
            .map(serde_wasm_bindgen::from_value)
            .transpose()
            .map_err(|e| JsValue::from_str(&format!("Failed to parse messages: {}", e)))?;

        let options: Option<DisplayOptions> = optional(options)
            .map(serde_wasm_bindgen::from_value)
            .transpose()
            .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?;

        build(fields, messages, options)
            .map(|inner| FormValidator { inner })
            .map_err(|e| {
                web_sys::console::error_1(&JsValue::from_str(&e));
                JsValue::from_str(&e)
            })
    }

    /// Evaluates one field; `undefined` when the id is not declared
    #[wasm_bindgen(js_name = evaluateField)]
    pub fn evaluate_field(&self, field_id: &str, values: JsValue) -> Result<JsValue, JsValue> {
        let ctx = self.snapshot(values)?;
        let verdict = self.inner.evaluate_field(field_id, &ctx);
        Ok(serde_wasm_bindgen::to_value(&verdict)?)
    }

    /// Evaluates every field; returns `{ errors, successes }`
    #[wasm_bindgen(js_name = evaluateForm)]
    pub fn evaluate_form(&self, values: JsValue) -> Result<JsValue, JsValue> {
        let ctx = self.snapshot(values)?;
        let report = self.inner.evaluate_form(&ctx);
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    fn snapshot(&self, values: JsValue) -> Result<FormValues, JsValue> {
        let inputs: HashMap<String, FieldInput> = serde_wasm_bindgen::from_value(values)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse values: {}", e)))?;
        Ok(form_values(&self.inner, inputs))
    }
}

/// Every supported rule with its default message
#[wasm_bindgen(js_name = listRules)]
pub fn list_rules() -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(&rule_infos())?)
}

/// Parses a declaration string into `{ rule, param }` objects
#[wasm_bindgen(js_name = parseDeclaration)]
pub fn parse_declaration_js(declaration: &str) -> Result<JsValue, JsValue> {
    let rules = parse(declaration).map_err(|e| JsValue::from_str(&e))?;
    Ok(serde_wasm_bindgen::to_value(&rules)?)
}

fn optional(value: JsValue) -> Option<JsValue> {
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// A messages object replaces the whole catalog, like a language file
fn build(
    fields: Vec<FieldSpec>,
    messages: Option<HashMap<String, String>>,
    options: Option<DisplayOptions>,
) -> Result<Validator, String> {
    let messages = match messages {
        Some(templates) => MessageCatalog::empty().with_overrides(templates),
        None => MessageCatalog::default(),
    };

    let mut builder = Validator::builder().fields(fields).messages(messages);
    if let Some(options) = options {
        builder = builder.options(options);
    }
    builder.build().map_err(|errors| errors.to_string())
}

fn form_values(validator: &Validator, inputs: HashMap<String, FieldInput>) -> FormValues {
    let mut values = validator.snapshot();
    values.apply(inputs);
    values
}

fn rule_infos() -> Vec<RuleInfo> {
    let defaults = MessageCatalog::default();
    RuleName::ALL
        .iter()
        .map(|rule| RuleInfo {
            name: rule.as_str(),
            takes_param: rule.takes_param(),
            message: defaults.get(MessageKey::Rule(*rule)).map(str::to_string),
        })
        .collect()
}

fn parse(declaration: &str) -> Result<Vec<ParsedRule>, String> {
    parse_declaration("declaration", declaration).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })
}
