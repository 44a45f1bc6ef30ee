//! Error types for degrees operations.

use crate::domain::UserId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for degrees operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A referenced user does not exist.
    #[error("User with ID {0} not found")]
    UserNotFound(UserId),

    /// A user with this ID has already been provisioned.
    #[error("User with ID {0} already exists")]
    DuplicateUser(UserId),

    /// A connection was requested between a user and themselves.
    #[error("User {0} cannot be connected to themselves")]
    SelfConnection(UserId),

    /// The backing store could not complete a request.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Storage format or backend error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors raised while locating or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.degrees/` directory was found.
    #[error("Not a degrees repository (or any parent directory). Run 'degrees init' first")]
    NotInitialized,

    /// `init` was run in a directory that already has a `.degrees/` directory.
    #[error("Degrees is already initialized in this directory. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configured storage backend is not known.
    #[error("Unknown storage backend '{0}'. Valid backends: memory")]
    UnknownBackend(String),
}

/// A specialized Result type for degrees operations.
pub type Result<T> = std::result::Result<T, Error>;
