//! Connection configuration
//!
//! Named connections come from a `ConfigSource`; inline maps bypass it.

pub mod resolver;
pub mod source;
pub mod types;

pub use resolver::{validate_connection, ConfigMap, ConnectionResolver};
pub use source::{ConfigSource, JsonConfigSource};
pub use types::{ConnectionDescriptor, CredentialSource, DEFAULT_LOG_CHANNEL};
