//! Env files against docker-compose requirements.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use envquack_common::error::Result;
use envquack_common::types::VariableSet;
use envquack_parser::compose::{ComposeInfo, parse_compose_file};
use envquack_parser::dotenv::parse_env_file;
use serde::Serialize;

use crate::merge::merge_env_files;

/// Drift between a compose manifest and the supplied env files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeDiff {
    /// Variables the manifest defines or references but no env file sets.
    pub missing_in_env: Vec<String>,
    /// Variables set in env files that the manifest never mentions.
    pub extra_in_env: Vec<String>,
    /// `env_file:` references that cannot be read as dotenv files.
    pub missing_env_files: Vec<String>,
    /// Missing variables per service; only services with at least one entry.
    pub service_breakdown: BTreeMap<String, Vec<String>>,
}

impl ComposeDiff {
    /// Returns `true` if anything needs attention.
    ///
    /// The service breakdown is derived from `missing_in_env` and does not
    /// count on its own.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.missing_in_env.is_empty()
            || !self.extra_in_env.is_empty()
            || !self.missing_env_files.is_empty()
    }
}

/// Compares a parsed manifest against merged env variables.
///
/// `is_loadable` decides whether an `env_file:` reference can be read; the
/// comparison itself performs no I/O.
pub fn compare_compose_with_env(
    info: &ComposeInfo,
    env: &VariableSet,
    is_loadable: impl Fn(&str) -> bool,
) -> ComposeDiff {
    let compose_vars = info.all_env_vars();
    let compose_set: BTreeSet<&str> = compose_vars.iter().map(String::as_str).collect();

    let missing_in_env = compose_vars
        .iter()
        .filter(|name| !env.contains(name.as_str()))
        .cloned()
        .collect();

    let extra_in_env = env
        .keys()
        .filter(|key| !compose_set.contains(key))
        .map(str::to_owned)
        .collect();

    let service_breakdown = info
        .service_variables
        .iter()
        .filter_map(|(service, vars)| {
            let missing: Vec<String> = vars
                .keys()
                .filter(|key| !env.contains(key))
                .map(str::to_owned)
                .collect();
            (!missing.is_empty()).then(|| (service.clone(), missing))
        })
        .collect();

    let missing_env_files = info
        .env_file_refs
        .iter()
        .filter(|path| !is_loadable(path.as_str()))
        .cloned()
        .collect();

    ComposeDiff {
        missing_in_env,
        extra_in_env,
        missing_env_files,
        service_breakdown,
    }
}

/// Parses the manifest and env files, then compares them.
///
/// Env files are merged in order (later wins) and unreadable ones are
/// skipped. `env_file:` references resolve relative to the manifest's
/// directory but are reported as written.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or decoded.
pub fn compare_compose_files<P: AsRef<Path>>(
    compose_path: &Path,
    env_paths: &[P],
) -> Result<ComposeDiff> {
    let info = parse_compose_file(compose_path)?;
    let env = merge_env_files(env_paths);
    let base = compose_path.parent().unwrap_or_else(|| Path::new(""));
    Ok(compare_compose_with_env(&info, &env, |reference| {
        parse_env_file(&base.join(reference)).is_ok()
    }))
}
