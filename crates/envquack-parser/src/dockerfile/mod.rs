//! Dockerfile parsing for `ENV` and `ARG` declarations.
//!
//! Parsing happens in two independent passes:
//!
//! 1. Physical lines are folded into logical instructions (`\` continuation)
//!    and each `ENV` / `ARG` instruction is interpreted.
//! 2. The whole raw text is scanned for `$VAR` / `${VAR}` references.
//!
//! A malformed instruction never aborts the parse; it is logged and recorded
//! in [`DockerfileInfo::warnings`].

pub mod lexer;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use envquack_common::constants::{OBVIOUS_CONSTANTS, SHELL_BUILTIN_VARS};
use envquack_common::error::{EnvQuackError, Result};
use envquack_common::types::VariableSet;
use serde::Serialize;

use self::lexer::Keyword;
use crate::dotenv::strip_quotes;
use crate::interpolation;

/// Environment information extracted from a Dockerfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DockerfileInfo {
    /// Variables declared with `ENV`.
    pub env_vars: VariableSet,
    /// Variables declared with `ARG`; an empty value means no default.
    pub arg_vars: VariableSet,
    /// Referenced variable names, sorted, minus shell built-ins.
    pub variable_refs: Vec<String>,
    /// Instructions that could not be interpreted.
    pub warnings: Vec<InstructionWarning>,
}

impl DockerfileInfo {
    /// Returns every variable name declared or referenced, sorted.
    #[must_use]
    pub fn all_vars(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .env_vars
            .keys()
            .chain(self.arg_vars.keys())
            .chain(self.variable_refs.iter().map(String::as_str))
            .collect();
        names.into_iter().map(str::to_owned).collect()
    }

    /// Names declared with `ENV`, sorted.
    pub fn env_names(&self) -> impl Iterator<Item = &str> {
        self.env_vars.keys()
    }

    /// Names declared with `ARG`, sorted.
    pub fn arg_names(&self) -> impl Iterator<Item = &str> {
        self.arg_vars.keys()
    }

    /// Returns `true` if `name` is declared or referenced anywhere.
    #[must_use]
    pub fn has_var(&self, name: &str) -> bool {
        self.env_vars.contains(name)
            || self.arg_vars.contains(name)
            || self.variable_refs.iter().any(|r| r == name)
    }
}

/// A non-fatal problem with a single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionWarning {
    /// 1-based line where the logical instruction starts. For an instruction
    /// continued with `\`, this is its first physical line, not its last.
    pub line: usize,
    /// Description of the problem.
    pub message: String,
}

impl fmt::Display for InstructionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} - {}", self.line, self.message)
    }
}

/// Reads and parses a Dockerfile from disk.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read. Malformed instructions
/// are reported as warnings, not errors.
pub fn parse_dockerfile_file(path: &Path) -> Result<DockerfileInfo> {
    tracing::info!(path = %path.display(), "parsing Dockerfile");
    let bytes = std::fs::read(path).map_err(|source| EnvQuackError::io(path, source))?;
    Ok(parse_dockerfile_str(&String::from_utf8_lossy(&bytes)))
}

/// Parses Dockerfile text.
#[must_use]
pub fn parse_dockerfile_str(content: &str) -> DockerfileInfo {
    let mut info = DockerfileInfo::default();

    for logical in fold_lines(content) {
        let Some((keyword, args)) = lexer::split_instruction(&logical.text) else {
            continue;
        };
        let outcome = match keyword {
            Keyword::Env => parse_env_args(args, &mut info.env_vars),
            Keyword::Arg => parse_arg_args(args, &mut info.arg_vars),
        };
        if let Err(message) = outcome {
            tracing::warn!(
                line = logical.line,
                instruction = keyword.as_str(),
                "{message}"
            );
            info.warnings.push(InstructionWarning {
                line: logical.line,
                message,
            });
        }
    }

    info.variable_refs = interpolation::dockerfile_references(content, SHELL_BUILTIN_VARS);
    info
}

/// One instruction after continuation folding.
#[derive(Debug)]
struct LogicalLine {
    line: usize,
    text: String,
}

/// Folds `\`-continued lines into logical instructions.
///
/// Blank lines and comments are dropped, including those inside a
/// continuation. A continuation left open at end of input is still emitted.
fn fold_lines(content: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    let mut start = 0;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if pending.is_empty() {
            start = idx + 1;
        }
        if let Some(head) = line.strip_suffix('\\') {
            pending.push_str(head);
            pending.push(' ');
            continue;
        }
        pending.push_str(line);
        lines.push(LogicalLine {
            line: start,
            text: std::mem::take(&mut pending),
        });
    }

    let tail = pending.trim();
    if !tail.is_empty() {
        lines.push(LogicalLine {
            line: start,
            text: tail.to_owned(),
        });
    }

    lines
}

/// `ENV KEY=VALUE [KEY=VALUE...]` or legacy `ENV KEY VALUE...`.
fn parse_env_args(args: &str, vars: &mut VariableSet) -> std::result::Result<(), String> {
    if args.contains('=') {
        parse_pairs(args, vars);
        return Ok(());
    }

    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(key), Some(first)) => {
            let value = std::iter::once(first).chain(parts).collect::<Vec<_>>().join(" ");
            let _ = vars.insert(key, value);
            Ok(())
        }
        _ => Err(format!("invalid ENV instruction format: {args}")),
    }
}

/// `ARG NAME` or `ARG NAME=DEFAULT`.
fn parse_arg_args(args: &str, vars: &mut VariableSet) -> std::result::Result<(), String> {
    if args.contains('=') {
        parse_pairs(args, vars);
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    match parts.as_slice() {
        [name] => {
            let _ = vars.insert(*name, "");
            Ok(())
        }
        _ => Err(format!("invalid ARG instruction format: {args}")),
    }
}

/// Quote-aware `KEY=VALUE` pairs; words without `=` are ignored.
fn parse_pairs(args: &str, vars: &mut VariableSet) {
    for word in lexer::split_words(args) {
        let Some((key, value)) = word.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let _ = vars.insert(key, strip_quotes(value.trim()));
    }
}

/// Returns `true` for values that read as constants rather than configuration.
///
/// Environment names, booleans, locales and common paths match a fixed list
/// case-insensitively. Absolute paths, URLs and `${...}` derivations count too.
#[must_use]
pub fn is_obvious_constant(value: &str) -> bool {
    OBVIOUS_CONSTANTS
        .iter()
        .any(|constant| constant.eq_ignore_ascii_case(value))
        || value.starts_with('/')
        || value.contains("://")
        || value.starts_with("${")
}

/// Returns `true` if an `ENV` value looks like configuration baked into the image.
#[must_use]
pub fn is_hardcoded_candidate(value: &str) -> bool {
    !value.is_empty() && !is_obvious_constant(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_single_pair() {
        let info = parse_dockerfile_str("FROM alpine\nENV APP_ENV=production\n");
        assert_eq!(info.env_vars.get("APP_ENV"), Some("production"));
        assert!(info.warnings.is_empty());
    }

    #[test]
    fn parse_env_multiple_pairs_with_quotes() {
        let info =
            parse_dockerfile_str(r#"ENV GREETING="hello world" NAME='app' PORT=8080"#);
        assert_eq!(info.env_vars.get("GREETING"), Some("hello world"));
        assert_eq!(info.env_vars.get("NAME"), Some("app"));
        assert_eq!(info.env_vars.get("PORT"), Some("8080"));
    }

    #[test]
    fn parse_env_legacy_form() {
        let info = parse_dockerfile_str("ENV MAINTAINER_NAME  Jane   Doe\n");
        assert_eq!(info.env_vars.get("MAINTAINER_NAME"), Some("Jane Doe"));
    }

    #[test]
    fn parse_env_keyword_case_insensitive() {
        let info = parse_dockerfile_str("env LOWER=1\nEnv Mixed=2\n");
        assert_eq!(info.env_vars.get("LOWER"), Some("1"));
        assert_eq!(info.env_vars.get("Mixed"), Some("2"));
    }

    #[test]
    fn parse_arg_without_default_is_empty() {
        let info = parse_dockerfile_str("ARG FOO\n");
        assert_eq!(info.arg_vars.get("FOO"), Some(""));
    }

    #[test]
    fn parse_arg_with_default() {
        let info = parse_dockerfile_str("ARG VERSION=\"1.2.3\"\n");
        assert_eq!(info.arg_vars.get("VERSION"), Some("1.2.3"));
    }

    #[test]
    fn parse_line_continuation() {
        let input = "ENV A=1 \\\n    B=2 \\\n    C=\"three four\"\nRUN echo done\n";
        let info = parse_dockerfile_str(input);
        assert_eq!(info.env_vars.len(), 3);
        assert_eq!(info.env_vars.get("C"), Some("three four"));
    }

    #[test]
    fn continuation_skips_comment_lines() {
        let input = "ENV A=1 \\\n# interleaved comment\n    B=2\n";
        let info = parse_dockerfile_str(input);
        assert_eq!(info.env_vars.get("A"), Some("1"));
        assert_eq!(info.env_vars.get("B"), Some("2"));
    }

    #[test]
    fn dangling_continuation_at_eof_is_parsed() {
        let info = parse_dockerfile_str("ARG LAST=1 \\");
        assert_eq!(info.arg_vars.get("LAST"), Some("1"));
    }

    #[test]
    fn malformed_instructions_are_warnings() {
        let input = "FROM alpine\nENV ONLYKEY\nARG TWO NAMES\nENV GOOD=1\n";
        let info = parse_dockerfile_str(input);
        assert_eq!(info.env_vars.get("GOOD"), Some("1"));
        assert_eq!(info.warnings.len(), 2);
        assert_eq!(info.warnings[0].line, 2);
        assert!(info.warnings[0].message.contains("invalid ENV"));
        assert_eq!(info.warnings[1].line, 3);
        assert!(info.warnings[1].to_string().starts_with("line 3 - invalid ARG"));
    }

    #[test]
    fn warning_line_is_start_of_continuation() {
        let input = "FROM alpine\n\nENV \\\n  LONELY\n";
        let info = parse_dockerfile_str(input);
        assert_eq!(info.warnings.len(), 1);
        assert_eq!(info.warnings[0].line, 3);
    }

    #[test]
    fn variable_refs_scan_whole_file() {
        let input = "ARG VERSION\nFROM node:${NODE_TAG}\n# uses $COMMENTED\nRUN echo $PATH $BUILD_ID\n";
        let info = parse_dockerfile_str(input);
        assert_eq!(
            info.variable_refs,
            vec!["BUILD_ID", "COMMENTED", "NODE_TAG"]
        );
    }

    #[test]
    fn all_vars_is_sorted_union() {
        let input = "ARG B_ARG\nENV A_ENV=${C_REF}\n";
        let info = parse_dockerfile_str(input);
        assert_eq!(info.all_vars(), vec!["A_ENV", "B_ARG", "C_REF"]);
        assert!(info.has_var("C_REF"));
        assert!(!info.has_var("NOPE"));
        assert_eq!(info.env_names().collect::<Vec<_>>(), vec!["A_ENV"]);
        assert_eq!(info.arg_names().collect::<Vec<_>>(), vec!["B_ARG"]);
    }

    #[test]
    fn obvious_constants() {
        for value in ["production", "TRUE", "0", "UTF-8", "en_us", "c", "/app"] {
            assert!(is_obvious_constant(value), "{value} should be a constant");
        }
        assert!(is_obvious_constant("/opt/service/bin"));
        assert!(is_obvious_constant("https://example.com"));
        assert!(is_obvious_constant("${BASE}/x"));
        assert!(!is_obvious_constant("s3cr3t"));
    }

    #[test]
    fn hardcoded_candidates() {
        assert!(is_hardcoded_candidate("sk_live_123"));
        assert!(!is_hardcoded_candidate(""));
        assert!(!is_hardcoded_candidate("development"));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Dockerfile");
        std::fs::write(&path, "ARG TOKEN\n").expect("write");
        let info = parse_dockerfile_file(&path).expect("parse");
        assert!(info.arg_vars.contains("TOKEN"));
    }

    #[test]
    fn parse_file_tolerates_non_utf8_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Dockerfile");
        std::fs::write(&path, b"# caf\xe9\nARG TOKEN\nENV LABEL=\xff\n").expect("write");
        let info = parse_dockerfile_file(&path).expect("parse");
        assert!(info.arg_vars.contains("TOKEN"));
        assert!(info.env_vars.contains("LABEL"));
    }

    #[test]
    fn parse_file_missing_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = parse_dockerfile_file(&dir.path().join("Dockerfile")).unwrap_err();
        assert!(err.is_not_found());
    }
}
