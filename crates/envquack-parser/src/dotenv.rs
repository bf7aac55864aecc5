//! Dotenv (`KEY=VALUE`) file parsing.
//!
//! The format is user-authored, so the parser is permissive: lines it does
//! not understand are skipped instead of aborting the whole read.

use std::path::Path;

use envquack_common::error::{EnvQuackError, Result};
use envquack_common::types::VariableSet;

/// Reads and parses a dotenv file.
///
/// Bytes that are not valid UTF-8 are replaced, never rejected.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn parse_env_file(path: &Path) -> Result<VariableSet> {
    tracing::info!(path = %path.display(), "parsing env file");
    let bytes = std::fs::read(path).map_err(|source| EnvQuackError::io(path, source))?;
    Ok(parse_env_str(&String::from_utf8_lossy(&bytes)))
}

/// Parses dotenv text into a [`VariableSet`].
///
/// Blank lines, `#` comments and lines without `=` are ignored. Values may
/// contain `=`; one layer of matching quotes around a value is removed.
#[must_use]
pub fn parse_env_str(content: &str) -> VariableSet {
    let mut vars = VariableSet::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let _ = vars.insert(key, strip_quotes(value.trim()));
    }

    vars
}

/// Removes one layer of matching single or double quotes.
pub(crate) fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 {
        for quote in ['"', '\''] {
            if let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return inner;
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_pairs() {
        let vars = parse_env_str("DB_HOST=localhost\nDB_PORT=5432\n");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("DB_HOST"), Some("localhost"));
        assert_eq!(vars.get("DB_PORT"), Some("5432"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let vars = parse_env_str("# header\n\n   \n  # indented comment\nKEY=value\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some("value"));
    }

    #[test]
    fn parse_splits_on_first_equals_only() {
        let vars = parse_env_str("DATABASE_URL=postgres://u:p@h/db?sslmode=require\n");
        assert_eq!(
            vars.get("DATABASE_URL"),
            Some("postgres://u:p@h/db?sslmode=require")
        );
    }

    #[test]
    fn parse_trims_key_and_value() {
        let vars = parse_env_str("  SPACED  =  some value  \n");
        assert_eq!(vars.get("SPACED"), Some("some value"));
    }

    #[test]
    fn parse_strips_one_layer_of_quotes() {
        let vars = parse_env_str("A=\"double\"\nB='single'\nC=\"'nested'\"\nD=\"mismatched'\n");
        assert_eq!(vars.get("A"), Some("double"));
        assert_eq!(vars.get("B"), Some("single"));
        assert_eq!(vars.get("C"), Some("'nested'"));
        assert_eq!(vars.get("D"), Some("\"mismatched'"));
    }

    #[test]
    fn parse_keeps_lone_quote_character() {
        let vars = parse_env_str("Q=\"\n");
        assert_eq!(vars.get("Q"), Some("\""));
    }

    #[test]
    fn parse_empty_value_is_present() {
        let vars = parse_env_str("API_KEY=\nEMPTY_QUOTED=\"\"\n");
        assert_eq!(vars.get("API_KEY"), Some(""));
        assert_eq!(vars.get("EMPTY_QUOTED"), Some(""));
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let vars = parse_env_str("NOT A PAIR\n=orphan\nGOOD=1\n");
        assert_eq!(vars.len(), 1);
        assert!(vars.contains("GOOD"));
    }

    #[test]
    fn parse_later_duplicate_wins() {
        let vars = parse_env_str("KEY=first\nKEY=second\n");
        assert_eq!(vars.get("KEY"), Some("second"));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "A=1\r\nB=2\r\n").expect("write");
        let vars = parse_env_file(&path).expect("parse");
        assert_eq!(vars.get("A"), Some("1"));
        assert_eq!(vars.get("B"), Some("2"));
    }

    #[test]
    fn parse_file_tolerates_non_utf8_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, b"GREETING=caf\xe9\nAPI_KEY=x\n").expect("write");
        let vars = parse_env_file(&path).expect("parse");
        assert_eq!(vars.get("GREETING"), Some("caf\u{fffd}"));
        assert_eq!(vars.get("API_KEY"), Some("x"));
    }

    #[test]
    fn parse_file_missing_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = parse_env_file(&dir.path().join("absent.env")).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("absent.env"));
    }
}
