//! Configuration model threaded through checks and report rendering.
//!
//! Every command builds one [`EnvQuackConfig`] from its arguments and passes
//! it (or its [`ReportOptions`]) explicitly; nothing is read from globals.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COMPOSE_FILE, DEFAULT_DOCKERFILE, DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE,
};

/// Root configuration for a single envquack invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvQuackConfig {
    /// Env files in override order: later files win on key collision.
    pub env_files: Vec<PathBuf>,
    /// Canonical example file.
    pub example: PathBuf,
    /// Docker Compose manifest.
    pub compose: PathBuf,
    /// Dockerfile to audit.
    pub dockerfile: PathBuf,
    /// Rendering options for text reports.
    pub report: ReportOptions,
}

impl EnvQuackConfig {
    /// Returns the primary env file (the first one configured).
    #[must_use]
    pub fn primary_env_file(&self) -> PathBuf {
        self.env_files
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE))
    }
}

impl Default for EnvQuackConfig {
    fn default() -> Self {
        Self {
            env_files: vec![PathBuf::from(DEFAULT_ENV_FILE)],
            example: PathBuf::from(DEFAULT_EXAMPLE_FILE),
            compose: PathBuf::from(DEFAULT_COMPOSE_FILE),
            dockerfile: PathBuf::from(DEFAULT_DOCKERFILE),
            report: ReportOptions::default(),
        }
    }
}

/// Controls how text reports are rendered.
///
/// Defaults: duck art on, colorized headers on, verbose sections off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Print the ASCII duck around reports.
    pub show_duck: bool,
    /// Use emoji and ANSI colors in section headers.
    pub colorize: bool,
    /// Include informational sections (service breakdown, hardcoded ENV, ARG defaults).
    pub verbose: bool,
}

impl ReportOptions {
    /// Returns a copy with the duck art disabled.
    #[must_use]
    pub const fn without_duck(self) -> Self {
        Self {
            show_duck: false,
            ..self
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_duck: true,
            colorize: true,
            verbose: false,
        }
    }
}
