//! Connection Types
//!
//! The resolved, validated form of one Workspace connection.

use std::fmt;
use std::path::PathBuf;

/// Log channel used when a connection does not name any
pub const DEFAULT_LOG_CHANNEL: &str = "single";

/// Where the service-account key comes from
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Path to a service-account JSON key file
    KeyFile(PathBuf),
    /// The service-account JSON key itself
    InlineKey(String),
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyFile(path) => f.debug_tuple("KeyFile").field(path).finish(),
            Self::InlineKey(_) => f.write_str("InlineKey(<redacted>)"),
        }
    }
}

/// Resolved configuration for one Workspace connection.
///
/// Built once by the resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    /// Connection name, `None` when built from an inline map
    pub key: Option<String>,
    /// Non-empty, in configuration order
    pub api_scopes: Vec<String>,
    pub customer_id: String,
    pub domain: String,
    /// Account to impersonate through domain-wide delegation
    pub subject_email: Option<String>,
    pub credential_source: CredentialSource,
    pub log_channels: Vec<String>,
}

impl ConnectionDescriptor {
    /// Connection name, or `"inline"` for unnamed connections
    pub fn display_key(&self) -> &str {
        self.key.as_deref().unwrap_or("inline")
    }
}
