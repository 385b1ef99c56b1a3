mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rusty-forms")]
#[command(version, about = "rusty-forms CLI - check form definitions and replay field changes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a form from its definition and show its initial state
    Check {
        /// Path to the form definition (TOML)
        form: PathBuf,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply field changes in order, optionally submit, and show the result
    Replay {
        /// Path to the form definition (TOML)
        form: PathBuf,

        /// Field change as name=value; repeat for several changes
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        changes: Vec<String>,

        /// Submit after the last change
        #[arg(long)]
        submit: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean; RUST_LOG overrides the level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { form, json } => {
            commands::check::execute(&form, json)?;
        }
        Commands::Replay {
            form,
            changes,
            submit,
            json,
        } => {
            commands::replay::execute(&form, &changes, submit, json)?;
        }
    }

    Ok(())
}
