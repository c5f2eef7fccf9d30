//! Path Utilities
//!
//! Location of the named-connection configuration file.

use std::path::PathBuf;

use super::error::WorkspaceError;

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "GOOGLE_WORKSPACE_CONFIG_PATH";

/// Get the gworkspace base directory (`~/.gworkspace/`)
pub fn gworkspace_dir() -> Result<PathBuf, WorkspaceError> {
    let home = dirs::home_dir()
        .ok_or_else(|| WorkspaceError::configuration("Could not determine home directory"))?;
    Ok(home.join(".gworkspace"))
}

/// Resolve the configuration file path.
///
/// `GOOGLE_WORKSPACE_CONFIG_PATH` wins when set and non-empty, otherwise
/// `~/.gworkspace/config.json`.
pub fn config_path() -> Result<PathBuf, WorkspaceError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(gworkspace_dir()?.join("config.json")),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that read or write `GOOGLE_WORKSPACE_CONFIG_PATH`
    pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_config_path_env_override() {
        let _guard = lock_env();

        std::env::set_var(CONFIG_PATH_ENV, "/etc/gworkspace/connections.json");
        assert_eq!(
            config_path().unwrap(),
            PathBuf::from("/etc/gworkspace/connections.json")
        );

        std::env::set_var(CONFIG_PATH_ENV, "   ");
        let blank = config_path().unwrap();

        std::env::remove_var(CONFIG_PATH_ENV);
        let unset = config_path().unwrap();

        let fallback = dirs::home_dir().unwrap().join(".gworkspace").join("config.json");
        assert_eq!(blank, fallback);
        assert_eq!(unset, fallback);
    }
}
