//! docker-compose manifest parsing.
//!
//! Decodes the YAML document with `serde_yaml`, normalizes every service's
//! `environment:` and `env_file:` sections, and scans the raw text for
//! interpolation references.

mod model;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use envquack_common::constants::COMPOSE_BUILTIN_VARS;
use envquack_common::error::{EnvQuackError, Result};
use envquack_common::types::VariableSet;
use serde::Serialize;

use self::model::{ComposeDocument, EnvFileEntry, EnvFileSection, EnvironmentSection};
use crate::interpolation;

/// Environment information extracted from a compose manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeInfo {
    /// Variables merged across all services; on collision the service that
    /// sorts last by name wins.
    pub variables: VariableSet,
    /// Each declared service's own variables.
    pub service_variables: BTreeMap<String, VariableSet>,
    /// Referenced env-file paths, sorted and de-duplicated.
    pub env_file_refs: Vec<String>,
    /// Interpolation references in the raw text, minus compose built-ins.
    pub variable_refs: Vec<String>,
}

impl ComposeInfo {
    /// Returns every variable name the manifest defines or references.
    #[must_use]
    pub fn all_env_vars(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .variables
            .keys()
            .chain(self.variable_refs.iter().map(String::as_str))
            .collect();
        names.into_iter().map(str::to_owned).collect()
    }

    /// Returns the declared service names in sorted order.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.service_variables.keys().map(String::as_str)
    }

    /// Returns the variables of `service`, or `None` if it is not declared.
    #[must_use]
    pub fn service_vars(&self, service: &str) -> Option<&VariableSet> {
        self.service_variables.get(service)
    }

    /// Returns `true` if `service` is declared in the manifest.
    #[must_use]
    pub fn has_service(&self, service: &str) -> bool {
        self.service_variables.contains_key(service)
    }
}

/// Reads and parses a compose manifest from disk.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a format error if it
/// is not a decodable compose document.
pub fn parse_compose_file(path: &Path) -> Result<ComposeInfo> {
    tracing::info!(path = %path.display(), "parsing compose file");
    let content =
        std::fs::read_to_string(path).map_err(|source| EnvQuackError::io(path, source))?;
    parse_compose(&content, &path.display().to_string())
}

/// Parses compose manifest text.
///
/// # Errors
///
/// Returns a format error if the text is not a decodable compose document.
pub fn parse_compose_str(content: &str) -> Result<ComposeInfo> {
    parse_compose(content, "<input>")
}

fn parse_compose(content: &str, origin: &str) -> Result<ComposeInfo> {
    let format_err = |source| EnvQuackError::Format {
        origin: origin.to_owned(),
        source,
    };
    let mut raw: serde_yaml::Value = serde_yaml::from_str(content).map_err(format_err)?;
    raw.apply_merge().map_err(format_err)?;
    let document: ComposeDocument = if raw.is_null() {
        ComposeDocument::default()
    } else {
        serde_yaml::from_value(raw).map_err(format_err)?
    };
    let services = document.services.unwrap_or_default();

    let mut info = ComposeInfo::default();
    let mut env_files = BTreeSet::new();

    for (name, service) in services {
        let service = service.unwrap_or_default();
        let vars = service
            .environment
            .map(normalize_environment)
            .unwrap_or_default();
        info.variables.extend_from(&vars);

        if let Some(section) = service.env_file {
            env_files.extend(normalize_env_files(section));
        }

        tracing::debug!(service = %name, vars = vars.len(), "collected service environment");
        let _ = info.service_variables.insert(name, vars);
    }

    info.env_file_refs = env_files.into_iter().collect();
    info.variable_refs = interpolation::compose_references(content, COMPOSE_BUILTIN_VARS);
    Ok(info)
}

fn normalize_environment(section: EnvironmentSection) -> VariableSet {
    match section {
        EnvironmentSection::List(items) => items
            .iter()
            .filter_map(serde_yaml::Value::as_str)
            .filter_map(split_env_entry)
            .collect(),
        EnvironmentSection::Map(entries) => entries
            .into_iter()
            .map(|(key, value)| (key, render_scalar(&value)))
            .collect(),
        EnvironmentSection::Other(value) => {
            tracing::debug!(?value, "ignoring unrecognized environment section");
            VariableSet::new()
        }
    }
}

/// Splits a list entry of the form `KEY=VALUE` or bare `KEY`.
fn split_env_entry(entry: &str) -> Option<(String, String)> {
    let entry = entry.trim();
    let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_owned(), value.trim().to_owned()))
}

fn render_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Tagged(tagged) => render_scalar(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => String::new(),
    }
}

fn normalize_env_files(section: EnvFileSection) -> Vec<String> {
    match section {
        EnvFileSection::Single(path) => vec![path],
        EnvFileSection::Multiple(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                EnvFileEntry::Path(path) | EnvFileEntry::Detailed { path } => Some(path),
                EnvFileEntry::Other(_) => None,
            })
            .collect(),
        EnvFileSection::Other(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_document() {
        let info = parse_compose_str("").expect("should parse empty input");
        assert!(info.variables.is_empty());
        assert!(info.service_variables.is_empty());
        assert!(info.env_file_refs.is_empty());
        assert!(info.variable_refs.is_empty());
    }

    #[test]
    fn parse_document_without_services() {
        let info = parse_compose_str("version: '3.8'\nservices:\n").expect("should parse");
        assert!(info.service_variables.is_empty());
    }

    #[test]
    fn list_and_map_environment_normalize_identically() {
        let list = parse_compose_str(
            "services:\n  app:\n    environment:\n      - A=1\n      - B\n",
        )
        .expect("list form");
        let map = parse_compose_str(
            "services:\n  app:\n    environment:\n      A: 1\n      B:\n",
        )
        .expect("map form");

        let expected: VariableSet = [("A", "1"), ("B", "")].into_iter().collect();
        assert_eq!(list.service_vars("app"), Some(&expected));
        assert_eq!(map.service_vars("app"), Some(&expected));
        assert_eq!(list.variables, map.variables);
    }

    #[test]
    fn map_environment_renders_scalars() {
        let info = parse_compose_str(
            "services:\n  app:\n    environment:\n      DEBUG: true\n      RATIO: 0.5\n      NAME: web\n",
        )
        .expect("should parse");
        assert_eq!(info.variables.get("DEBUG"), Some("true"));
        assert_eq!(info.variables.get("RATIO"), Some("0.5"));
        assert_eq!(info.variables.get("NAME"), Some("web"));
    }

    #[test]
    fn list_environment_keeps_equals_in_value() {
        let info = parse_compose_str(
            "services:\n  app:\n    environment:\n      - \"DSN=host=db port=5432\"\n",
        )
        .expect("should parse");
        assert_eq!(info.variables.get("DSN"), Some("host=db port=5432"));
    }

    #[test]
    fn unrecognized_environment_shape_is_empty() {
        let info = parse_compose_str("services:\n  app:\n    environment: just-a-string\n")
            .expect("should parse");
        assert!(info.has_service("app"));
        assert_eq!(info.service_vars("app").map(VariableSet::len), Some(0));
    }

    #[test]
    fn env_file_scalar_and_list_forms() {
        let info = parse_compose_str(
            "services:\n  api:\n    env_file: .env\n  worker:\n    env_file:\n      - .env\n      - .env.worker\n      - path: .env.optional\n        required: false\n",
        )
        .expect("should parse");
        assert_eq!(
            info.env_file_refs,
            vec![".env", ".env.optional", ".env.worker"]
        );
    }

    #[test]
    fn merged_variables_last_service_wins() {
        let info = parse_compose_str(
            "services:\n  alpha:\n    environment:\n      LEVEL: a\n  beta:\n    environment:\n      LEVEL: b\n",
        )
        .expect("should parse");
        assert_eq!(info.variables.get("LEVEL"), Some("b"));
        assert_eq!(info.service_vars("alpha").and_then(|v| v.get("LEVEL")), Some("a"));
    }

    #[test]
    fn variable_refs_exclude_builtins() {
        let info = parse_compose_str(
            "services:\n  app:\n    image: \"app:${TAG:-latest}\"\n    volumes:\n      - ${HOME}/data:/data\n    container_name: ${COMPOSE_PROJECT_NAME}_app\n    environment:\n      - DB_URL=$DATABASE_URL\n",
        )
        .expect("should parse");
        assert_eq!(info.variable_refs, vec!["DATABASE_URL", "TAG"]);
    }

    #[test]
    fn all_env_vars_is_union_of_defined_and_referenced() {
        let info = parse_compose_str(
            "services:\n  app:\n    environment:\n      - API_URL=${API_HOST}/v1\n      - LOG_LEVEL\n",
        )
        .expect("should parse");
        assert_eq!(info.all_env_vars(), vec!["API_HOST", "API_URL", "LOG_LEVEL"]);
    }

    #[test]
    fn merge_keys_are_resolved_in_environment() {
        let info = parse_compose_str(
            "x-env: &env\n  DB_URL: x\nservices:\n  app:\n    environment:\n      <<: *env\n      PORT: 80\n",
        )
        .expect("should parse");
        let expected: VariableSet = [("DB_URL", "x"), ("PORT", "80")].into_iter().collect();
        assert_eq!(info.service_vars("app"), Some(&expected));
        assert!(!info.variables.contains("<<"));
    }

    #[test]
    fn merge_keys_are_resolved_at_service_level() {
        let info = parse_compose_str(
            "x-common: &common\n  environment:\n    LOG_LEVEL: info\n  env_file: .env.shared\nservices:\n  api:\n    <<: *common\n    image: api\n  worker:\n    <<: *common\n",
        )
        .expect("should parse");
        assert_eq!(info.service_vars("api").and_then(|v| v.get("LOG_LEVEL")), Some("info"));
        assert_eq!(
            info.service_vars("worker").and_then(|v| v.get("LOG_LEVEL")),
            Some("info")
        );
        assert_eq!(info.env_file_refs, vec![".env.shared"]);
    }

    #[test]
    fn defined_and_referenced_names_appear_once() {
        let info = parse_compose_str(
            "services:\n  web:\n    command: serve --port $PORT --host ${HOST:-0.0.0.0}\n    environment:\n      - PORT\n      - HOST=${HOST}\n",
        )
        .expect("should parse");
        assert_eq!(info.all_env_vars(), vec!["HOST", "PORT"]);
    }

    #[test]
    fn escaped_dollar_is_not_a_reference() {
        let info = parse_compose_str(
            "services:\n  web:\n    command: sh -c 'echo $$SHELL_ONLY $$${REAL_REF}'\n",
        )
        .expect("should parse");
        assert_eq!(info.variable_refs, vec!["REAL_REF"]);
    }

    #[test]
    fn null_service_body_is_empty_service() {
        let info = parse_compose_str("services:\n  cache:\n").expect("should parse");
        assert!(info.has_service("cache"));
        assert_eq!(info.services().collect::<Vec<_>>(), vec!["cache"]);
    }

    #[test]
    fn invalid_yaml_is_format_error() {
        let err = parse_compose_str("services:\n  app: [unclosed\n").unwrap_err();
        assert!(
            matches!(err, EnvQuackError::Format { .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn parse_file_error_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("docker-compose.yml");
        std::fs::write(&path, "services: [1, 2\n").expect("write");
        let err = parse_compose_file(&path).unwrap_err();
        assert!(err.to_string().contains("docker-compose.yml"), "got: {err}");
    }
}
