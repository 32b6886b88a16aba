//! Integration tests for rusty-rules
//!
//! End-to-end scenarios through the public API: construction, per-field
//! evaluation and whole-form aggregation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_rules::*;

fn validator(fields: Vec<FieldSpec>) -> Validator {
    Validator::new(fields, MessageCatalog::default()).expect("valid configuration")
}

fn verdict(rules: &str, value: &str) -> FieldVerdict {
    let v = validator(vec![FieldSpec::new("field", rules).label("Field")]);
    let values = FormValues::new().with_value("field", value);
    v.evaluate_field("field", &values).expect("declared field")
}

#[test]
fn test_min_length_reports_its_parameter() {
    let FieldVerdict::Error(error) = verdict("min_length[5]", "ab") else {
        panic!("expected an error");
    };
    assert_eq!(error.field_id, "field");
    assert_eq!(error.rule, RuleName::MinLength);
    assert!(error.message.contains('5'));
}

#[test]
fn test_min_length_skips_empty_values() {
    assert_eq!(
        verdict("min_length[5]", ""),
        FieldVerdict::Success(SuccessResult {
            field_id: "field".to_string()
        })
    );
}

#[rstest]
#[case("x", true)]
#[case("y", false)]
fn test_equal_to(#[case] value: &str, #[case] passes: bool) {
    let v = validator(vec![
        FieldSpec::new("fieldA", "equal_to[fieldB,Field B]").label("Field A"),
        FieldSpec::new("fieldB", "").label("Field B"),
    ]);
    let values = FormValues::new()
        .with_value("fieldA", value)
        .with_value("fieldB", "x");

    let verdict = v.evaluate_field("fieldA", &values).unwrap();
    assert_eq!(verdict.is_success(), passes);
    if let Some(error) = verdict.error() {
        assert_eq!(error.message, "Field A must be identical to the Field B field");
    }
}

#[rstest]
#[case("green", None)]
#[case("purple", Some("Field accepts only 'red, green, blue' values"))]
fn test_in_list(#[case] value: &str, #[case] expected: Option<&str>) {
    let verdict = verdict("in_list[red,green,blue]", value);
    assert_eq!(verdict.error().map(|e| e.message.as_str()), expected);
}

#[rstest]
#[case("29/02/2021", false)]
#[case("29/02/2020", true)]
#[case("31/11/2020", false)]
#[case("2020/02/29", false)]
fn test_date(#[case] value: &str, #[case] passes: bool) {
    assert_eq!(verdict("date[ddmmyyyy,/]", value).is_success(), passes);
}

#[test]
fn test_inverted_range_is_a_configuration_error() {
    let errors = Validator::new(
        [FieldSpec::new("nickname", "range_length[10,5]")],
        MessageCatalog::default(),
    )
    .unwrap_err();

    assert_eq!(errors.len(), 1);
    let text = errors.to_string();
    assert!(text.contains("nickname"), "{text}");
    assert!(text.contains("range_length"), "{text}");
}

#[rstest]
#[case("alpha", "abc1")]
#[case("alpha_numeric", "ab c")]
#[case("alpha_dash", "ab c")]
#[case("numeric", "1.2.3")]
#[case("integer", "1.5")]
#[case("decimal", "15")]
#[case("natural", "-1")]
#[case("natural_no_zero", "0")]
#[case("email", "nobody@")]
#[case("ip_address", "256.1.1.1")]
#[case("base64", "not base64!")]
#[case("url", "http://192.168.0.1")]
#[case("time", "24:00:00")]
#[case("password", "password")]
#[case("credit_card", "1234567890123")]
fn test_pattern_rules_reject(#[case] rule: &str, #[case] value: &str) {
    let verdict = verdict(rule, value);
    assert_eq!(verdict.error().map(|e| e.rule.as_str()), Some(rule));
}

#[rstest]
#[case("alpha", "abc")]
#[case("alpha_space", "ab c")]
#[case("alpha_dash_space", "a_b-c d")]
#[case("numeric", "-.5")]
#[case("decimal", "10.55")]
#[case("email", "ada@example.com")]
#[case("ip_address", "10.0.0.1")]
#[case("url", "https://example.com/path?q=1")]
#[case("time", "23:59:59")]
#[case("password", "Secr3t!")]
#[case("credit_card", "4111111111111111")]
#[case("email", " ada@example.com")]
#[case("alpha", " abc")]
#[case("integer", "42 ")]
#[case("url", " https://example.com ")]
fn test_pattern_rules_accept(#[case] rule: &str, #[case] value: &str) {
    assert!(verdict(rule, value).is_success());
}

#[test]
fn test_required_message_names_the_field() {
    let v = validator(vec![FieldSpec::new("email", "required|email").label("E-mail address")]);
    let report = v.evaluate_form(&FormValues::new());
    assert_eq!(report.errors[0].message, "E-mail address is required.");
}

#[test]
fn test_unlabelled_field_uses_placeholder_label() {
    let v = validator(vec![FieldSpec::new("email", "required")]);
    let report = v.evaluate_form(&FormValues::new());
    assert_eq!(report.errors[0].message, "{label} is required.");
}

#[test]
fn test_short_circuits_on_first_failure() {
    let FieldVerdict::Error(error) = verdict("required|min_length[3]", "  ") else {
        panic!("expected an error");
    };
    assert_eq!(error.rule, RuleName::Required);
}

#[test]
fn test_signup_form() {
    let v = Validator::builder()
        .fields([
            FieldSpec::new("username", "required|alpha_dash|range_length[3,16]").label("Username"),
            FieldSpec::new("password", "required|password").label("Password"),
            FieldSpec::new("confirm", "required|equal_to[password,Password]").label("Confirmation"),
            FieldSpec::new("age", "natural|greater_than_equal_to[18]").label("Age"),
            FieldSpec::new("plan-free", "required_one_of")
                .label("Plan")
                .kind(FieldKind::Radio)
                .group("plan"),
            FieldSpec::new("plan-pro", "").label("Pro").kind(FieldKind::Radio).group("plan"),
            FieldSpec::new("terms", "required").label("Terms").kind(FieldKind::Checkbox),
        ])
        .options(DisplayOptions::new("signup", "signup-submit").display(ErrorDisplay::OnBlur))
        .build()
        .unwrap();

    let mut values = v.snapshot();
    values.set_value("username", "ada_l");
    values.set_value("password", "Secr3t!");
    values.set_value("confirm", "Secr3t?");
    values.set_value("age", "16");

    let report = v.evaluate_form(&values);
    let failed: Vec<_> = report
        .errors
        .iter()
        .map(|e| (e.field_id.as_str(), e.rule))
        .collect();
    assert_eq!(
        failed,
        vec![
            ("confirm", RuleName::EqualTo),
            ("age", RuleName::GreaterThanEqualTo),
            ("plan-free", RuleName::RequiredOneOf),
            ("terms", RuleName::Required),
        ]
    );
    assert!(!report.is_valid());

    values.set_value("confirm", "Secr3t!");
    values.set_value("age", "18");
    values.set_checked("plan-pro", true);
    values.set_checked("terms", true);

    let report = v.evaluate_form(&values);
    assert!(report.is_valid(), "{:?}", report.errors);
    assert_eq!(report.successes.len(), 7);
}

#[test]
fn test_language_file_replaces_messages() {
    let messages = MessageCatalog::from_json(
        r#"{
            "required": "{field} est obligatoire.",
            "min_length": "{field} doit contenir au moins {min} caractères"
        }"#,
    )
    .unwrap();

    let v = Validator::new([FieldSpec::new("nom", "required|min_length[2]").label("Nom")], messages)
        .unwrap();
    let report = v.evaluate_form(&FormValues::new().with_value("nom", "a"));
    assert_eq!(report.errors[0].message, "Nom doit contenir au moins 2 caractères");

    let incomplete = MessageCatalog::from_json(r#"{"required": "{field} est obligatoire."}"#).unwrap();
    let errors = Validator::new([FieldSpec::new("nom", "email")], incomplete).unwrap_err();
    assert!(matches!(
        errors.errors(),
        [ConfigError::MissingMessage { rule: RuleName::Email, .. }]
    ));
}
