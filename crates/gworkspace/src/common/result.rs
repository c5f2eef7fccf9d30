//! Common Result Type

use super::error::WorkspaceError;

/// Crate-wide result type
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
