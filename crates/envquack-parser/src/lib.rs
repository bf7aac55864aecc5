//! # envquack-parser
//!
//! Turns the three kinds of configuration sources envquack understands into
//! normalized variable sets.
//!
//! Handles:
//! - **Dotenv**: `KEY=VALUE` files.
//! - **Compose**: docker-compose manifests (`environment:`, `env_file:`, interpolation).
//! - **Dockerfile**: `ENV` / `ARG` instructions and `$VAR` references.
//! - **Interpolation**: raw-text scans for `${VAR}` / `$VAR` references.

pub mod compose;
pub mod dockerfile;
pub mod dotenv;
pub mod interpolation;

pub use crate::compose::{ComposeInfo, parse_compose_file, parse_compose_str};
pub use crate::dockerfile::{DockerfileInfo, parse_dockerfile_file, parse_dockerfile_str};
pub use crate::dotenv::{parse_env_file, parse_env_str};
