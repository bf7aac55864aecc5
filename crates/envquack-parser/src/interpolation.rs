//! Scanning raw text for `${VAR}` / `$VAR` interpolation references.
//!
//! Scans are purely syntactic: references are collected, never resolved.
//! Only upper-snake-case names are recognized.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Patterns used on compose manifests: `${VAR}`, `${VAR:-default}` and `$VAR`.
static COMPOSE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        compile(r"\$\{([A-Z_][A-Z0-9_]*)\}"),
        compile(r"\$\{([A-Z_][A-Z0-9_]*):?[^}]*\}"),
        compile(r"\$([A-Z_][A-Z0-9_]*)"),
    ]
});

/// Single pattern used on Dockerfiles, braces optional.
static DOCKERFILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\$\{?([A-Z_][A-Z0-9_]*)\}?"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("interpolation pattern is a valid regex")
}

/// Collects references found in a compose manifest, minus `excluded` names.
///
/// `$$` is compose's escape for a literal `$` and never starts a reference.
/// Returns names sorted and de-duplicated.
#[must_use]
pub fn compose_references(content: &str, excluded: &[&str]) -> Vec<String> {
    let unescaped = content.replace("$$", "");
    collect(COMPOSE_PATTERNS.iter(), &unescaped, excluded)
}

/// Collects references found in a Dockerfile, minus `excluded` names.
///
/// Returns names sorted and de-duplicated.
#[must_use]
pub fn dockerfile_references(content: &str, excluded: &[&str]) -> Vec<String> {
    collect(std::iter::once(&*DOCKERFILE_PATTERN), content, excluded)
}

fn collect<'a>(
    patterns: impl Iterator<Item = &'a Regex>,
    content: &str,
    excluded: &[&str],
) -> Vec<String> {
    let mut names = BTreeSet::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(content) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !excluded.contains(&name) {
                let _ = names.insert(name.to_owned());
            }
        }
    }
    names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_finds_all_three_forms() {
        let text = "image: app:${TAG}\ncommand: run --db ${DB_URL:-sqlite://x} --port $PORT\n";
        let refs = compose_references(text, &[]);
        assert_eq!(refs, vec!["DB_URL", "PORT", "TAG"]);
    }

    #[test]
    fn compose_handles_modifiers() {
        let text = "a: ${REQUIRED?must be set}\nb: ${WITH_DASH-fallback}\nc: ${OFFSET:1}";
        let refs = compose_references(text, &[]);
        assert_eq!(refs, vec!["OFFSET", "REQUIRED", "WITH_DASH"]);
    }

    #[test]
    fn compose_ignores_lowercase_names() {
        let refs = compose_references("x: ${lower} $mixedCase ${UPPER}", &[]);
        assert_eq!(refs, vec!["UPPER"]);
    }

    #[test]
    fn compose_filters_excluded_names() {
        let refs = compose_references("x: ${HOME}/${APP_DIR} $USER", &["HOME", "USER"]);
        assert_eq!(refs, vec!["APP_DIR"]);
    }

    #[test]
    fn compose_skips_escaped_dollars() {
        let refs = compose_references("a: $$LITERAL $${ALSO_LITERAL} $$$REAL", &[]);
        assert_eq!(refs, vec!["REAL"]);
    }

    #[test]
    fn references_are_deduplicated() {
        let refs = dockerfile_references("$A ${A} ${A:-x} $B", &[]);
        assert_eq!(refs, vec!["A", "B"]);
    }

    #[test]
    fn dockerfile_filters_shell_builtins() {
        let refs = dockerfile_references("ENV PATH=$PATH:/opt/bin\nRUN echo $APP_HOME", &["PATH"]);
        assert_eq!(refs, vec!["APP_HOME"]);
    }

    #[test]
    fn no_references_yields_empty_list() {
        assert!(compose_references("services: {}", &[]).is_empty());
        assert!(dockerfile_references("FROM alpine\n", &[]).is_empty());
    }
}
