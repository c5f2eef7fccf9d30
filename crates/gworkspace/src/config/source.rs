//! Named Configuration Source
//!
//! Read-only access to the `connections.<key>.*` / `default.connection` tree.
//! Loading is kept separate from lookup so tests can hand in a tree directly.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::common::{config_path, WorkspaceError, WorkspaceResult};

/// Key/value contract consumed by the connection resolver
pub trait ConfigSource: Send + Sync {
    /// Look up a value by path segments, e.g. `["connections", "test", "domain"]`
    fn lookup(&self, path: &[&str]) -> Option<&Value>;
}

/// Configuration tree backed by a JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonConfigSource {
    root: Value,
}

impl JsonConfigSource {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// An empty tree; only inline configuration can be resolved against it
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON configuration file
    pub fn from_file(path: &Path) -> WorkspaceResult<Self> {
        // Check file size (max 1MB)
        let metadata = fs::metadata(path).map_err(|e| {
            WorkspaceError::configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        if metadata.len() > 1_000_000 {
            return Err(WorkspaceError::configuration(
                "Configuration file too large (max 1MB)",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            WorkspaceError::configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let root: Value = serde_json::from_str(&content).map_err(|e| {
            WorkspaceError::configuration(format!(
                "Failed to parse configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("Loaded Google Workspace configuration from {:?}", path);
        Ok(Self { root })
    }

    /// Load from `GOOGLE_WORKSPACE_CONFIG_PATH` or `~/.gworkspace/config.json`
    pub fn load_default() -> WorkspaceResult<Self> {
        let path = config_path()?;
        debug!("Resolving configuration file at {:?}", path);
        Self::from_file(&path)
    }
}

impl ConfigSource for JsonConfigSource {
    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.root, |node, segment| node.get(*segment))
    }
}
