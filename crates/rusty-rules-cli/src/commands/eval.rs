use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use rusty_rules::{FieldInput, FieldVerdict, FormReport, FormValues, Validator};

use crate::commands::check::print_errors;
use crate::manifest::Manifest;

pub fn execute(manifest_path: &Path, values_path: &Path, field: Option<&str>) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let validator = match manifest.validator()? {
        Ok(validator) => validator,
        Err(errors) => {
            print_errors(&errors);
            bail!("{} has {} configuration error(s)", manifest_path.display(), errors.len());
        }
    };

    let values = load_values(&validator, values_path)?;

    match field {
        Some(id) => {
            let verdict = validator
                .evaluate_field(id, &values)
                .ok_or_else(|| anyhow!("Field {:?} is not declared in {}", id, manifest_path.display()))?;
            print_verdict(&verdict);
            if let FieldVerdict::Error(error) = verdict {
                bail!("{} failed {}", error.field_id, error.rule);
            }
        }
        None => {
            let report = validator.evaluate_form(&values);
            print_report(&report);
            if !report.is_valid() {
                bail!("form {} would not submit", manifest.form.id);
            }
        }
    }

    Ok(())
}

fn load_values(validator: &Validator, path: &Path) -> Result<FormValues> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file: {:?}", path))?;
    let inputs: HashMap<String, FieldInput> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse values file: {:?}", path))?;

    for id in inputs.keys() {
        if validator.field(id).is_none() {
            tracing::warn!(field = %id, "value recorded for an undeclared field");
        }
    }

    let mut values = validator.snapshot();
    values.apply(inputs);
    Ok(values)
}

fn print_verdict(verdict: &FieldVerdict) {
    match verdict {
        FieldVerdict::Success(success) => {
            println!("  {} {}", "✓".green(), success.field_id.bold());
        }
        FieldVerdict::Error(error) => {
            println!(
                "  {} {} {} {}",
                "✗".red(),
                error.field_id.bold(),
                format!("[{}]", error.rule).dimmed(),
                error.message
            );
        }
    }
}

fn print_report(report: &FormReport) {
    for success in &report.successes {
        print_verdict(&FieldVerdict::Success(success.clone()));
    }
    for error in &report.errors {
        print_verdict(&FieldVerdict::Error(error.clone()));
    }

    println!();
    if report.is_valid() {
        println!("{}", "Form is valid".green().bold());
    } else {
        println!(
            "{}",
            format!("{} field(s) failed", report.errors.len()).red().bold()
        );
    }
}
