//! `envquack check`: compare `.env` against `.env.example`.

use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use envquack_checker::compare_env_files;
use envquack_common::config::EnvQuackConfig;

use super::{ensure_exists, exit_status};
use crate::output;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print the diff as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `check` command.
///
/// Exits with failure when the key sets differ.
///
/// # Errors
///
/// Returns an error if either file is missing or unreadable.
pub fn execute(args: &CheckArgs, config: &EnvQuackConfig) -> anyhow::Result<ExitCode> {
    let env_path = config.primary_env_file();
    ensure_exists("example", &config.example).context("example file error")?;
    ensure_exists("env", &env_path).context("env file error")?;

    let diff = compare_env_files(&env_path, &config.example).context("failed to compare files")?;
    tracing::debug!(missing = diff.missing.len(), extra = diff.extra.len(), "comparison done");

    if args.json {
        println!("{}", output::to_json(&diff)?);
    } else {
        print!("{}", output::env_report(&diff, config.report));
        if config.report.verbose {
            println!("Summary: {}", diff.summary());
        }
    }

    Ok(exit_status(diff.has_issues()))
}
