//! # envquack-checker
//!
//! Reconciliation engine: compares normalized variable sets and reports
//! typed drift.
//!
//! Handles:
//! - **Env**: `.env` against `.env.example` (missing / extra).
//! - **Compose**: env files against a compose manifest's requirements.
//! - **Dockerfile**: env files against `ENV` / `ARG` declarations and references.
//! - **Merge**: combining several env files in override order.
//! - **Sync**: appending missing example keys to an env file.
//!
//! The `compare_*_with_env` / `compare_env_vars` functions are pure; the
//! `compare_*_files` wrappers do the file reading.

pub mod compose;
pub mod dockerfile;
pub mod env;
pub mod merge;
pub mod sync;

pub use crate::compose::{ComposeDiff, compare_compose_files, compare_compose_with_env};
pub use crate::dockerfile::{DockerfileDiff, compare_dockerfile_files, compare_dockerfile_with_env};
pub use crate::env::{EnvDiff, compare_env_files, compare_env_vars};
pub use crate::merge::merge_env_files;
pub use crate::sync::{SyncOutcome, sync_missing};
