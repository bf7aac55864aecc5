//! Appending missing example keys to an env file.

use std::io::Write;
use std::path::Path;

use envquack_common::constants::SYNC_MARKER;
use envquack_common::error::{EnvQuackError, Result};
use envquack_common::types::VariableSet;
use envquack_parser::dotenv::{parse_env_file, parse_env_str};

use crate::env::compare_env_vars;

/// What a sync run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Keys appended to the env file, sorted.
    pub added: Vec<String>,
    /// Whether the env file did not exist beforehand.
    pub created: bool,
}

/// Appends a `KEY=` line to `env_path` for every key of `example_path` it lacks.
///
/// A missing env file is created. When the existing file already defines
/// variables, the new block is preceded by a marker comment.
///
/// # Errors
///
/// Returns an error if the example cannot be read, or if the env file exists
/// but cannot be read or written.
pub fn sync_missing(env_path: &Path, example_path: &Path) -> Result<SyncOutcome> {
    let example = parse_env_file(example_path)?;

    let existing = match std::fs::read(env_path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(source) => return Err(EnvQuackError::io(env_path, source)),
    };
    let created = existing.is_none();
    let content = existing.unwrap_or_default();
    let env = parse_env_str(&content);

    let added = compare_env_vars(&env, &example).missing;
    if added.is_empty() {
        return Ok(SyncOutcome { added, created });
    }

    tracing::info!(path = %env_path.display(), count = added.len(), "appending missing variables");
    let block = render_block(&content, &env, &added);
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(env_path)
        .map_err(|source| EnvQuackError::io(env_path, source))?;
    file.write_all(block.as_bytes())
        .map_err(|source| EnvQuackError::io(env_path, source))?;

    Ok(SyncOutcome { added, created })
}

fn render_block(content: &str, env: &VariableSet, keys: &[String]) -> String {
    let mut block = String::new();
    if !content.is_empty() && !content.ends_with('\n') {
        block.push('\n');
    }
    if !env.is_empty() {
        block.push('\n');
        block.push_str(SYNC_MARKER);
        block.push('\n');
    }
    for key in keys {
        block.push_str(key);
        block.push_str("=\n");
    }
    block
}
