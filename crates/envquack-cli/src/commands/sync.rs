//! `envquack sync`: append missing example keys to `.env`.

use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use envquack_checker::sync_missing;
use envquack_common::config::EnvQuackConfig;

use super::ensure_exists;
use crate::duck;

/// Arguments for the `sync` command.
#[derive(Args, Debug)]
pub struct SyncArgs {}

/// Executes the `sync` command.
///
/// Drift never affects the exit status; only failures do.
///
/// # Errors
///
/// Returns an error if the example file is missing or a file cannot be
/// read or written.
pub fn execute(_args: &SyncArgs, config: &EnvQuackConfig) -> anyhow::Result<ExitCode> {
    let env_path = config.primary_env_file();
    let show_duck = config.report.show_duck;
    ensure_exists("example", &config.example).context("example file error")?;

    if !env_path.exists() {
        println!("Creating new {} file...", env_path.display());
    }

    let outcome = sync_missing(&env_path, &config.example)
        .with_context(|| format!("failed to sync {}", env_path.display()))?;

    if outcome.added.is_empty() {
        println!("✅ No missing variables to sync.");
        if show_duck {
            println!("(Your duck is already happy!)");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if show_duck {
        println!("{}", duck::SYNCING);
    }
    println!(
        "Adding {} missing variables to {}:",
        outcome.added.len(),
        env_path.display()
    );
    for key in &outcome.added {
        println!("  + {key}");
    }
    println!("\n✅ Successfully synced {} variables!", outcome.added.len());
    println!("Don't forget to set the actual values in your env file.");

    Ok(ExitCode::SUCCESS)
}
