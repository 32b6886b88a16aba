use std::path::Path;

use anyhow::{bail, Result};
use colored::Colorize;
use rusty_rules::ConfigErrors;

use crate::manifest::Manifest;

pub fn execute(path: &Path) -> Result<()> {
    let manifest = Manifest::load(path)?;

    println!("{}", "Checking form manifest...".green().bold());
    println!();
    println!("Form: {}", manifest.form.id.cyan());
    println!();

    let validator = match manifest.validator()? {
        Ok(validator) => validator,
        Err(errors) => {
            print_errors(&errors);
            bail!("{} has {} configuration error(s)", path.display(), errors.len());
        }
    };

    for field in validator.fields() {
        let rules: Vec<String> = field.rules().iter().map(ToString::to_string).collect();
        println!(
            "  {} {} {}",
            "✓".green(),
            field.id().bold(),
            rules.join("|").dimmed()
        );
    }

    println!();
    println!(
        "{}",
        format!("{} field(s) ready", validator.fields().len())
            .green()
            .bold()
    );

    Ok(())
}

pub fn print_errors(errors: &ConfigErrors) {
    for error in errors {
        println!("  {} {}", "✗".red(), error);
    }
    println!();
}
