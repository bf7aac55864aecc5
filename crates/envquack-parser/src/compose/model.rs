//! Decode-boundary model of a docker-compose manifest.
//!
//! Only the fields envquack reads are modeled; everything else in the
//! document is ignored. The polymorphic `environment` and `env_file` fields
//! are untagged enums here and are normalized by the parser right away.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Root of a compose manifest.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ComposeDocument {
    /// Service definitions keyed by service name.
    #[serde(default)]
    pub services: Option<BTreeMap<String, Option<ComposeService>>>,
}

/// A single service definition.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ComposeService {
    /// The `environment:` section.
    #[serde(default)]
    pub environment: Option<EnvironmentSection>,
    /// The `env_file:` section.
    #[serde(default)]
    pub env_file: Option<EnvFileSection>,
}

/// `environment:` as either a list of `KEY=VALUE` strings or a mapping.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvironmentSection {
    /// `- KEY=VALUE` / `- KEY` entries.
    List(Vec<serde_yaml::Value>),
    /// `KEY: value` entries.
    Map(BTreeMap<String, serde_yaml::Value>),
    /// Any other shape; normalizes to an empty set.
    Other(serde_yaml::Value),
}

/// `env_file:` as a single path or a list of entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvFileSection {
    /// `env_file: .env`
    Single(String),
    /// `env_file: [.env, .env.local]`
    Multiple(Vec<EnvFileEntry>),
    /// Any other shape; contributes no paths.
    Other(serde_yaml::Value),
}

/// One entry of a list-form `env_file:`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvFileEntry {
    /// Plain path string.
    Path(String),
    /// Long form `{ path: ..., required: ... }`.
    Detailed {
        /// Path of the env file.
        path: String,
    },
    /// Any other entry; ignored.
    Other(serde_yaml::Value),
}
