//! ASCII duck art.

/// Shown when everything lines up.
pub const HAPPY: &str = r"   __
<(o )___   All good!
 ( ._> /
  '---'";

/// Shown when drift is detected.
pub const ANGRY: &str = r"   __
<(X )___   QUACK!
 ( ._> /
  '---'";

/// Shown while `sync` writes to the env file.
pub const SYNCING: &str = r"   __
<(~ )___   Syncing...
 ( ._> /
  '---'";

/// Long description of the CLI.
pub const BANNER: &str = r"
 ___            ___                 _
| __|_ ___ ___ / _ \ _  _ __ _ __ _| |__
| _|| ' \ V / | (_) | || / _' / _' | / /
|___|_||_\_/   \__\_\\_,_\__,_\__,_|_\_\

Environment Variable Drift Detective 🦆

envquack keeps .env, .env.example, docker-compose and Dockerfile in sync.";
