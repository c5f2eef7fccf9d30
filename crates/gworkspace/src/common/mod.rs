//! Common Utilities
//!
//! Shared error handling, HTTP client construction and path resolution.

pub mod error;
pub mod http;
pub mod paths;
pub mod result;

pub use error::WorkspaceError;
pub use http::{create_http_client, create_http_client_with_timeout, DEFAULT_TIMEOUT, USER_AGENT};
pub use paths::{config_path, gworkspace_dir, CONFIG_PATH_ENV};
pub use result::WorkspaceResult;
