//! Error types for Tablescope
//!
//! Uses `thiserror` for library errors. Errors raised while inspecting a value
//! (serialization, invocation, persistence) are recovered locally and never
//! reach this top-level type.

use std::path::PathBuf;
use thiserror::Error;

use crate::explorer::TreePath;

/// Result type alias for Tablescope operations
pub type TablescopeResult<T> = Result<T, TablescopeError>;

/// Main error type for Tablescope operations
#[derive(Error, Debug)]
pub enum TablescopeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot document could not be parsed
    #[error("invalid snapshot in {file}: {message}")]
    InvalidSnapshot { file: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Explorer construction or interaction failed
    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    /// Unknown panel section name
    #[error("unknown section '{name}' (expected one of: {expected})")]
    UnknownSection { name: String, expected: String },
}

/// Errors from constructing or interacting with an explorer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// Page size must be a positive integer
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Default expansion could not be parsed
    #[error("invalid default expansion: {0}")]
    InvalidExpansion(String),

    /// No node lives at the given path
    #[error("no node at path '{0}'")]
    NoSuchNode(TreePath),

    /// The node at the given path is not callable
    #[error("node at '{0}' is not callable")]
    NotCallable(TreePath),
}

/// A leaf value could not be serialized structurally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("value contains a reference cycle")]
    Cycle,

    #[error("value contains non-serializable content: {0}")]
    Unsupported(String),
}

/// The preference store failed to read or write.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("preference store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("preference store unavailable")]
    Unavailable,
}
