mod commands;
mod manifest;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rusty-rules")]
#[command(version, about = "rusty-rules CLI - declarative form validation", long_about = None)]
struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a form manifest and report every configuration error
    Check {
        /// Path to the form manifest (form.toml)
        manifest: PathBuf,
    },

    /// Evaluate recorded form values against a manifest
    Eval {
        /// Path to the form manifest (form.toml)
        manifest: PathBuf,

        /// JSON object of field id to value or { value, checked }
        values: PathBuf,

        /// Evaluate only this field
        #[arg(short, long)]
        field: Option<String>,
    },

    /// List supported rules and their default messages
    Rules,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    // Execute command
    match cli.command {
        Commands::Check { manifest } => {
            commands::check::execute(&manifest)?;
        }
        Commands::Eval {
            manifest,
            values,
            field,
        } => {
            commands::eval::execute(&manifest, &values, field.as_deref())?;
        }
        Commands::Rules => {
            commands::rules::execute()?;
        }
    }

    Ok(())
}
