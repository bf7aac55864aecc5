//! Merging several env files into one variable set.

use std::path::Path;

use envquack_common::types::VariableSet;
use envquack_parser::dotenv::parse_env_file;

/// Parses `paths` in order and merges them; later files override earlier ones.
///
/// Files that cannot be read are skipped. Missing env-file references are
/// surfaced separately by the compose comparison.
#[must_use]
pub fn merge_env_files<P: AsRef<Path>>(paths: &[P]) -> VariableSet {
    let mut merged = VariableSet::new();
    for path in paths {
        let path = path.as_ref();
        match parse_env_file(path) {
            Ok(vars) => merged.extend_from(&vars),
            Err(err) => tracing::debug!(path = %path.display(), %err, "skipping env file"),
        }
    }
    merged
}
