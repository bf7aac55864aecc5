//! Env files against Dockerfile `ENV` / `ARG` declarations.

use std::collections::BTreeSet;
use std::path::Path;

use envquack_common::error::Result;
use envquack_common::types::VariableSet;
use envquack_parser::dockerfile::{DockerfileInfo, is_hardcoded_candidate, parse_dockerfile_file};
use serde::Serialize;

use crate::merge::merge_env_files;

/// Drift between a Dockerfile and the supplied env files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DockerfileDiff {
    /// Variables the Dockerfile needs that neither an `ENV` nor an env file sets.
    pub missing_in_env: Vec<String>,
    /// Variables set in env files that the Dockerfile never mentions.
    pub extra_in_env: Vec<String>,
    /// `ARG` names that are never referenced.
    pub unused_args: Vec<String>,
    /// `ENV` names whose literal value looks like configuration.
    pub hardcoded_envs: Vec<String>,
    /// `ARG` names declared without a default.
    pub missing_arg_defaults: Vec<String>,
}

impl DockerfileDiff {
    /// Returns `true` if anything needs attention.
    ///
    /// `missing_arg_defaults` is informational and not counted.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.missing_in_env.is_empty()
            || !self.extra_in_env.is_empty()
            || !self.unused_args.is_empty()
            || !self.hardcoded_envs.is_empty()
    }
}

/// Compares a parsed Dockerfile against merged env variables.
///
/// An `ENV` instruction satisfies its own variable: a name only counts as
/// missing when neither the Dockerfile's `ENV` set nor `env` has it.
#[must_use]
pub fn compare_dockerfile_with_env(info: &DockerfileInfo, env: &VariableSet) -> DockerfileDiff {
    let docker_vars = info.all_vars();
    let docker_set: BTreeSet<&str> = docker_vars.iter().map(String::as_str).collect();
    let refs: BTreeSet<&str> = info.variable_refs.iter().map(String::as_str).collect();

    let missing_in_env = docker_vars
        .iter()
        .filter(|name| !info.env_vars.contains(name.as_str()) && !env.contains(name.as_str()))
        .cloned()
        .collect();

    let extra_in_env = env
        .keys()
        .filter(|key| !docker_set.contains(key))
        .map(str::to_owned)
        .collect();

    let unused_args = info
        .arg_names()
        .filter(|name| !refs.contains(name))
        .map(str::to_owned)
        .collect();

    let hardcoded_envs = info
        .env_vars
        .iter()
        .filter(|(_, value)| is_hardcoded_candidate(value))
        .map(|(name, _)| name.to_owned())
        .collect();

    let missing_arg_defaults = info
        .arg_vars
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_owned())
        .collect();

    DockerfileDiff {
        missing_in_env,
        extra_in_env,
        unused_args,
        hardcoded_envs,
        missing_arg_defaults,
    }
}

/// Parses the Dockerfile and env files, then compares them.
///
/// Env files are merged in order (later wins); unreadable ones are skipped.
///
/// # Errors
///
/// Returns an error if the Dockerfile cannot be read.
pub fn compare_dockerfile_files<P: AsRef<Path>>(
    dockerfile_path: &Path,
    env_paths: &[P],
) -> Result<DockerfileDiff> {
    let info = parse_dockerfile_file(dockerfile_path)?;
    let env = merge_env_files(env_paths);
    Ok(compare_dockerfile_with_env(&info, &env))
}
