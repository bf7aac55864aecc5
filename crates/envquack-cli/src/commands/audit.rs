//! `envquack audit`: env, compose and Dockerfile checks in one pass.
//!
//! Each source is checked independently: a missing input skips its step,
//! a parse failure fails only that step.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Args;
use envquack_checker::{
    ComposeDiff, DockerfileDiff, EnvDiff, compare_compose_files, compare_dockerfile_files,
    compare_env_vars, merge_env_files,
};
use envquack_common::config::{EnvQuackConfig, ReportOptions};
use envquack_parser::dotenv::parse_env_file;
use serde::Serialize;

use super::exit_status;
use crate::{duck, output};

/// Arguments for the `audit` command.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Path to the docker-compose manifest.
    #[arg(long, value_name = "PATH", default_value = envquack_common::constants::DEFAULT_COMPOSE_FILE)]
    pub compose: PathBuf,

    /// Path to the Dockerfile.
    #[arg(long, value_name = "PATH", default_value = envquack_common::constants::DEFAULT_DOCKERFILE)]
    pub dockerfile: PathBuf,

    /// Print all results as JSON instead of text reports.
    #[arg(long)]
    pub json: bool,
}

/// Any diff that can report whether it needs attention.
trait Drift {
    fn has_issues(&self) -> bool;
}

impl Drift for EnvDiff {
    fn has_issues(&self) -> bool {
        Self::has_issues(self)
    }
}

impl Drift for ComposeDiff {
    fn has_issues(&self) -> bool {
        Self::has_issues(self)
    }
}

impl Drift for DockerfileDiff {
    fn has_issues(&self) -> bool {
        Self::has_issues(self)
    }
}

/// Result of one audit step.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Step<T> {
    Skipped { reason: String },
    Failed { error: String },
    Done { diff: T },
}

impl<T: Drift> Step<T> {
    fn needs_attention(&self) -> bool {
        match self {
            Self::Skipped { .. } => false,
            Self::Failed { .. } => true,
            Self::Done { diff } => diff.has_issues(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditReport {
    env: Step<EnvDiff>,
    compose: Step<ComposeDiff>,
    dockerfile: Step<DockerfileDiff>,
}

impl AuditReport {
    fn needs_attention(&self) -> bool {
        self.env.needs_attention()
            || self.compose.needs_attention()
            || self.dockerfile.needs_attention()
    }
}

/// Executes the `audit` command.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails; per-source problems
/// are reported in the output and reflected in the exit status.
pub fn execute(args: &AuditArgs, config: &EnvQuackConfig) -> anyhow::Result<ExitCode> {
    let report = AuditReport {
        env: env_step(config),
        compose: compose_step(config),
        dockerfile: dockerfile_step(config),
    };
    let failed = report.needs_attention();

    if args.json {
        println!("{}", output::to_json(&report)?);
    } else {
        print_report(&report, config.report);
    }

    Ok(exit_status(failed))
}

fn env_step(config: &EnvQuackConfig) -> Step<EnvDiff> {
    let env_files: Vec<&Path> = config
        .env_files
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| path.exists())
        .collect();
    if !config.example.exists() {
        return Step::Skipped {
            reason: format!("No {} found, skipping env check", config.example.display()),
        };
    }
    if env_files.is_empty() {
        return Step::Skipped {
            reason: "No env file found, skipping env check".to_owned(),
        };
    }

    match parse_env_file(&config.example) {
        Ok(example) => Step::Done {
            diff: compare_env_vars(&merge_env_files(&env_files), &example),
        },
        Err(err) => Step::Failed {
            error: err.to_string(),
        },
    }
}

fn compose_step(config: &EnvQuackConfig) -> Step<ComposeDiff> {
    if !config.compose.exists() {
        return Step::Skipped {
            reason: format!("No {} found, skipping compose check", config.compose.display()),
        };
    }
    match compare_compose_files(&config.compose, &config.env_files) {
        Ok(diff) => Step::Done { diff },
        Err(err) => {
            tracing::debug!(error = %err, "compose step failed");
            Step::Failed {
                error: err.to_string(),
            }
        }
    }
}

fn dockerfile_step(config: &EnvQuackConfig) -> Step<DockerfileDiff> {
    if !config.dockerfile.exists() {
        return Step::Skipped {
            reason: format!(
                "No {} found, skipping Dockerfile check",
                config.dockerfile.display()
            ),
        };
    }
    match compare_dockerfile_files(&config.dockerfile, &config.env_files) {
        Ok(diff) => Step::Done { diff },
        Err(err) => Step::Failed {
            error: err.to_string(),
        },
    }
}

fn print_report(report: &AuditReport, opts: ReportOptions) {
    println!("🔍 Running comprehensive environment audit...\n");

    let section_opts = opts.without_duck();
    print_step(
        "📋 Checking env files vs example:",
        "Basic env check passed",
        &report.env,
        |diff| output::env_report(diff, section_opts),
    );
    print_step(
        "🐳 Checking docker-compose environment requirements:",
        "Docker Compose check passed",
        &report.compose,
        |diff| output::compose_report(diff, section_opts),
    );
    print_step(
        "🐋 Checking Dockerfile environment requirements:",
        "Dockerfile check passed",
        &report.dockerfile,
        |diff| output::dockerfile_report(diff, section_opts),
    );

    let failed = report.needs_attention();
    if opts.show_duck {
        if failed {
            println!("{}", duck::ANGRY);
            println!("QUACK! 🦆 Audit found issues that need attention!");
        } else {
            println!("{}", duck::HAPPY);
            println!("✅ Audit passed! Your environment is well organized.");
        }
    } else if failed {
        println!("❌ Audit found issues that need attention!");
    } else {
        println!("✅ Audit passed! Your environment is well organized.");
    }
}

fn print_step<T: Drift>(
    header: &str,
    passed: &str,
    step: &Step<T>,
    render: impl FnOnce(&T) -> String,
) {
    match step {
        Step::Skipped { reason } => {
            println!("  ℹ️  {reason}\n");
        }
        Step::Failed { error } => {
            println!("{header}");
            println!("  ❌ Error: {error}\n");
        }
        Step::Done { diff } if !diff.has_issues() => {
            println!("{header}");
            println!("  ✅ {passed}\n");
        }
        Step::Done { diff } => {
            println!("{header}");
            println!("{}\n", output::indent(&render(diff)));
        }
    }
}
