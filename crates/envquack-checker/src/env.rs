//! `.env` against `.env.example` comparison.

use std::path::Path;

use envquack_common::error::Result;
use envquack_common::types::VariableSet;
use envquack_parser::dotenv::parse_env_file;
use serde::Serialize;

/// Key-level difference between an env file and its example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvDiff {
    /// Keys present in the example but missing from the env file.
    pub missing: Vec<String>,
    /// Keys present in the env file but absent from the example.
    pub extra: Vec<String>,
}

impl EnvDiff {
    /// Returns `true` if the key sets differ at all.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.missing.is_empty() || !self.extra.is_empty()
    }

    /// One-line summary such as `"2 missing, 1 extra"`.
    #[must_use]
    pub fn summary(&self) -> String {
        if !self.has_issues() {
            return "No issues found".to_owned();
        }
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("{} missing", self.missing.len()));
        }
        if !self.extra.is_empty() {
            parts.push(format!("{} extra", self.extra.len()));
        }
        parts.join(", ")
    }
}

/// Compares key presence between `env` and `example`; values are ignored.
#[must_use]
pub fn compare_env_vars(env: &VariableSet, example: &VariableSet) -> EnvDiff {
    EnvDiff {
        missing: difference(example, env),
        extra: difference(env, example),
    }
}

/// Parses both files and compares them.
///
/// # Errors
///
/// Returns an I/O error if either file cannot be read.
pub fn compare_env_files(env_path: &Path, example_path: &Path) -> Result<EnvDiff> {
    let env = parse_env_file(env_path)?;
    let example = parse_env_file(example_path)?;
    Ok(compare_env_vars(&env, &example))
}

/// Keys of `left` absent from `right`, sorted.
fn difference(left: &VariableSet, right: &VariableSet) -> Vec<String> {
    left.keys()
        .filter(|key| !right.contains(key))
        .map(str::to_owned)
        .collect()
}
