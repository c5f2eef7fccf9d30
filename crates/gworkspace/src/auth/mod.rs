//! Authentication
//!
//! The `Authenticator` boundary exchanges a connection descriptor for a bearer
//! token. Token refresh is the authenticator's concern; a facade holds its
//! token for its whole lifetime.

pub mod service_account;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::common::WorkspaceResult;
use crate::config::ConnectionDescriptor;

pub use service_account::{ServiceAccountAuthenticator, ServiceAccountKey};

/// OAuth bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Exchanges a connection for a bearer token.
///
/// Failures must be reported as `WorkspaceError::Authentication`; callers
/// propagate them unchanged.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, connection: &ConnectionDescriptor) -> WorkspaceResult<BearerToken>;
}

/// Hands out a pre-minted token regardless of the connection
#[derive(Debug, Clone)]
pub struct StaticTokenAuthenticator {
    token: BearerToken,
}

impl StaticTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: BearerToken::new(token),
        }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, _connection: &ConnectionDescriptor) -> WorkspaceResult<BearerToken> {
        Ok(self.token.clone())
    }
}
