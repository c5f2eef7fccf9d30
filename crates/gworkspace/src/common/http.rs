//! HTTP Client Utilities
//!
//! Shared HTTP client creation and the outbound User-Agent.

use once_cell::sync::Lazy;
use std::time::Duration;

use super::error::WorkspaceError;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `gworkspace/<version> rustc/<version>`
pub static USER_AGENT: Lazy<String> = Lazy::new(|| {
    format!(
        "{}/{} rustc/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("GWORKSPACE_RUSTC_VERSION")
    )
});

/// Create a reqwest HTTP client with standard configuration
///
/// - 10 second connect timeout
/// - Request timeouts are set per request by the transport
pub fn create_http_client() -> Result<reqwest::Client, WorkspaceError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| WorkspaceError::transport(format!("Failed to build HTTP client: {}", e)))
}

/// Create a reqwest HTTP client with a client-wide timeout
pub fn create_http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client, WorkspaceError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
        .map_err(|e| WorkspaceError::transport(format!("Failed to build HTTP client: {}", e)))
}
