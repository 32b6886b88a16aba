use anyhow::Result;
use colored::Colorize;
use rusty_rules::{MessageCatalog, MessageKey, RuleName};

pub fn execute() -> Result<()> {
    let messages = MessageCatalog::default();

    println!("{}", "Supported rules".green().bold());
    println!();

    for rule in RuleName::ALL {
        let name = if rule.takes_param() {
            format!("{}[{}]", rule, param_hint(rule))
        } else {
            rule.to_string()
        };

        let message = MessageCatalog::keys_for_name(rule)
            .into_iter()
            .filter_map(|key| messages.get(key))
            .next()
            .unwrap_or_default();

        println!("  {:<36} {}", name.cyan(), message.dimmed());
    }

    println!();
    println!(
        "{}",
        format!("{} rules. Combine them with |, e.g. required|min_length[5]", RuleName::ALL.len())
            .dimmed()
    );

    Ok(())
}

fn param_hint(rule: RuleName) -> &'static str {
    match rule {
        RuleName::MinLength | RuleName::MaxLength | RuleName::ExactLength => "n",
        RuleName::RangeLength => "min,max",
        RuleName::GreaterThan
        | RuleName::GreaterThanEqualTo
        | RuleName::LessThan
        | RuleName::LessThanEqualTo => "number",
        RuleName::InList => "a,b,...",
        RuleName::EqualTo | RuleName::DifferentFrom => "field_id,Field label",
        RuleName::Date => "ddmmyyyy|yyyymmdd,/|-|.",
        _ => "",
    }
}
