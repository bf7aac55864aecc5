//! Default paths, built-in variable lists, and other fixed values.

/// Binary name for the CLI.
pub const BIN_NAME: &str = "envquack";

/// Default path of the environment file under check.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default path of the canonical example file.
pub const DEFAULT_EXAMPLE_FILE: &str = ".env.example";

/// Default path of the Docker Compose manifest.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Default path of the Dockerfile.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";

/// Comment written before variables appended by `sync`.
pub const SYNC_MARKER: &str = "# Added by envquack sync";

/// Variables owned by Compose or the host, never expected in an env file.
pub const COMPOSE_BUILTIN_VARS: &[&str] = &[
    "COMPOSE_PROJECT_NAME",
    "COMPOSE_FILE",
    "COMPOSE_PATH_SEPARATOR",
    "DOCKER_HOST",
    "DOCKER_TLS_VERIFY",
    "DOCKER_CERT_PATH",
    "HOSTNAME",
    "USER",
    "HOME",
    "PATH",
    "PWD",
];

/// Shell and OS variables that commonly appear in `RUN` lines.
pub const SHELL_BUILTIN_VARS: &[&str] = &[
    "PATH", "HOME", "USER", "SHELL", "TERM", "PWD", "OLDPWD", "HOSTNAME", "UID", "GID",
];

/// ENV values that read as constants rather than configuration.
///
/// Compared case-insensitively.
pub const OBVIOUS_CONSTANTS: &[&str] = &[
    "production",
    "development",
    "staging",
    "test",
    "true",
    "false",
    "0",
    "1",
    "utf8",
    "utf-8",
    "en_US",
    "C",
    "/app",
    "/usr/local/bin",
    "/bin",
    "/tmp",
];
