//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV_VAR: &str = "FITCOACH_DATA_DIR";

/// Resolve the FitCoach data directory.
///
/// `FITCOACH_DATA_DIR` if set, else `~/.fitcoach`, else `.fitcoach` in the
/// current directory. The directory is not created; a missing one simply
/// means no `config.toml`.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV_VAR).ok(), dirs::home_dir())
}

fn data_dir_from(env_value: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_value.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".fitcoach");
    }

    PathBuf::from(".fitcoach")
}
