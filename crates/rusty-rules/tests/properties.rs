//! Property-based tests for rusty-rules.

use proptest::prelude::*;
use rusty_rules::parser::parse_rule;
use rusty_rules::*;

fn single(rules: &str) -> Validator {
    Validator::new([FieldSpec::new("f", rules).label("F")], MessageCatalog::default())
        .expect("valid configuration")
}

/// Declarations covering every parameter shape
fn declaration() -> impl Strategy<Value = String> {
    let bare = prop::sample::select(
        RuleName::ALL
            .iter()
            .filter(|rule| !rule.takes_param())
            .map(|rule| rule.as_str().to_string())
            .collect::<Vec<_>>(),
    );

    prop_oneof![
        bare,
        (0usize..1000).prop_map(|n| format!("min_length[{n}]")),
        (0usize..50, 1usize..50).prop_map(|(min, extra)| format!("range_length[ {min} , {} ]", min + extra)),
        (-1000.0f64..1000.0).prop_map(|x| format!("less_than[{x}]")),
        prop::collection::vec("[a-z]{1,6}", 1..5).prop_map(|items| format!("in_list[{}]", items.join(" , "))),
        ("[a-z]{1,8}", "[A-Z][a-z ]{0,10}[a-z]").prop_map(|(t, l)| format!("different_from[{t},{l}]")),
        prop::sample::select(vec!["ddmmyyyy", "yyyymmdd"])
            .prop_flat_map(|order| prop::sample::select(vec!["/", "-", "."]).prop_map(move |sep| format!("date[{order},{sep}]"))),
    ]
}

// ============================================================================
// PARSING: the canonical form re-parses to an equal rule
// ============================================================================

proptest! {
    #[test]
    fn canonical_form_reparses(decl in declaration()) {
        let rule = parse_rule(&decl).unwrap();
        prop_assert_eq!(parse_rule(&rule.to_string()), Ok(rule));
    }

    #[test]
    fn parser_never_panics(decl in ".{0,40}") {
        let _ = rusty_rules::parser::parse_declaration("f", &decl);
    }
}

// ============================================================================
// EVALUATION: deterministic, required names the field
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_idempotent(value in ".{0,20}", rules in prop::sample::select(vec![
        "required|alpha_numeric|max_length[8]",
        "numeric|greater_than[3]",
        "email",
        "in_list[a,b,c]",
        "date[yyyymmdd,-]",
    ])) {
        let v = single(rules);
        let values = FormValues::new().with_value("f", value);
        prop_assert_eq!(v.evaluate_form(&values), v.evaluate_form(&values));
    }

    #[test]
    fn required_on_blank_names_the_label(blank in "[ \t\n]{0,5}", label in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]") {
        let v = Validator::new([FieldSpec::new("f", "required").label(label.clone())], MessageCatalog::default())
            .unwrap();
        let verdict = v.evaluate_field("f", &FormValues::new().with_value("f", blank)).unwrap();
        let error = verdict.error().cloned().unwrap();
        prop_assert!(error.message.contains(&label));
    }

    #[test]
    fn pattern_rules_agree_with_the_library(value in "[ -~]{1,24}", pattern in prop::sample::select(Pattern::ALL.to_vec())) {
        prop_assume!(!value.trim().is_empty());
        let v = single(pattern.rule_name().as_str());
        let verdict = v.evaluate_field("f", &FormValues::new().with_value("f", value.clone())).unwrap();
        prop_assert_eq!(verdict.is_success(), pattern.matches(value.trim()));
    }

    #[test]
    fn first_rule_wins(value in "[a-z]{0,3}") {
        prop_assume!(!value.is_empty());
        let v = single("min_length[5]|numeric");
        let verdict = v.evaluate_field("f", &FormValues::new().with_value("f", value)).unwrap();
        prop_assert_eq!(verdict.error().map(|e| e.rule), Some(RuleName::MinLength));
    }
}

// ============================================================================
// AGGREGATION: no duplicate ids, however many passes are merged
// ============================================================================

proptest! {
    #[test]
    fn merged_reports_have_unique_ids(passes in prop::collection::vec(prop::collection::vec((0u8..4, any::<bool>()), 0..6), 1..5)) {
        let mut report = FormReport::new();
        for pass in passes {
            let mut next = FormReport::new();
            for (id, ok) in pass {
                let field_id = format!("field-{id}");
                next.record(if ok {
                    FieldVerdict::Success(SuccessResult { field_id })
                } else {
                    FieldVerdict::Error(ErrorResult {
                        field_id,
                        rule: RuleName::Required,
                        message: "required".to_string(),
                    })
                });
            }
            report.merge(next);
        }

        let mut error_ids: Vec<_> = report.errors.iter().map(|e| e.field_id.clone()).collect();
        let mut success_ids: Vec<_> = report.successes.iter().map(|s| s.field_id.clone()).collect();
        let (errors, successes) = (error_ids.len(), success_ids.len());
        error_ids.sort();
        error_ids.dedup();
        success_ids.sort();
        success_ids.dedup();
        prop_assert_eq!(error_ids.len(), errors);
        prop_assert_eq!(success_ids.len(), successes);
    }
}
