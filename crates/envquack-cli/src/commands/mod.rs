//! CLI command definitions and dispatch.

#![allow(clippy::print_stdout)]

pub mod audit;
pub mod check;
pub mod sync;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use envquack_common::config::{EnvQuackConfig, ReportOptions};
use envquack_common::constants::{BIN_NAME, DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE};
use envquack_common::error::EnvQuackError;

/// envquack: Environment Variable Drift Detective.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = crate::duck::BANNER)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the env file (repeat with `audit` to layer files; later files win).
    #[arg(long = "env", value_name = "PATH", global = true, default_value = DEFAULT_ENV_FILE)]
    pub env_files: Vec<PathBuf>,

    /// Path to the example file.
    #[arg(long, value_name = "PATH", global = true, default_value = DEFAULT_EXAMPLE_FILE)]
    pub example: PathBuf,

    /// Show informational sections and debug logs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable ASCII duck art.
    #[arg(long, global = true)]
    pub no_duck: bool,
}

impl Cli {
    /// Builds the explicit configuration every command runs with.
    #[must_use]
    pub fn config(&self) -> EnvQuackConfig {
        let mut config = EnvQuackConfig {
            env_files: self.env_files.clone(),
            example: self.example.clone(),
            report: ReportOptions {
                show_duck: !self.no_duck,
                colorize: !self.no_color,
                verbose: self.verbose,
            },
            ..EnvQuackConfig::default()
        };
        if let Command::Audit(args) = &self.command {
            config.compose.clone_from(&args.compose);
            config.dockerfile.clone_from(&args.dockerfile);
        }
        config
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check for differences between .env and .env.example.
    Check(check::CheckArgs),
    /// Append variables missing from .env with empty values.
    Sync(sync::SyncArgs),
    /// Audit env files against .env.example, docker-compose and Dockerfile.
    Audit(audit::AuditArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if a required input is missing or cannot be parsed.
pub fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.config();
    match cli.command {
        Command::Check(args) => check::execute(&args, &config),
        Command::Sync(args) => sync::execute(&args, &config),
        Command::Audit(args) => audit::execute(&args, &config),
    }
}

/// Fails with a "does not exist" error if `path` is absent.
fn ensure_exists(kind: &'static str, path: &Path) -> Result<(), EnvQuackError> {
    if path.exists() {
        Ok(())
    } else {
        Err(EnvQuackError::NotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Exit status for a run that found (or did not find) issues.
const fn exit_status(has_issues: bool) -> ExitCode {
    if has_issues {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
