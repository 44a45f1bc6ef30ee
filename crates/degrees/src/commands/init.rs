//! Implementation of the `init` command.
//!
//! This module handles initialization of a new degrees repository, creating
//! the `.degrees/` directory with configuration and an empty graph file.

use crate::config::{
    CONFIG_FILE_NAME, DEFAULT_REFERENCE_USER, DEGREES_DIR_NAME, DegreesConfig, GRAPH_FILE_NAME,
    validate_reference_user,
};
use crate::domain::UserId;
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Maximum directory depth to traverse when searching for the degrees root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created degrees directory
    pub degrees_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created graph file
    pub graph_file: PathBuf,
    /// The configured reference user
    pub reference_user: UserId,
}

/// Initialize a new degrees repository in the given directory.
///
/// # Errors
///
/// Returns an error if:
/// - The `.degrees/` directory already exists
/// - The reference user is not a positive ID
/// - File system operations fail
pub async fn init(base_dir: &Path, reference_user: Option<i64>) -> Result<InitResult> {
    let reference_user = reference_user.unwrap_or(DEFAULT_REFERENCE_USER);
    validate_reference_user(reference_user)?;

    let degrees_dir = base_dir.join(DEGREES_DIR_NAME);
    if degrees_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(degrees_dir).into());
    }

    fs::create_dir_all(&degrees_dir).await?;

    let config_file = degrees_dir.join(CONFIG_FILE_NAME);
    let config = DegreesConfig::new(UserId(reference_user));
    config.save(&config_file).await?;

    let graph_file = degrees_dir.join(GRAPH_FILE_NAME);
    fs::write(&graph_file, "").await?;

    tracing::debug!(dir = %degrees_dir.display(), "Initialized degrees repository");

    Ok(InitResult {
        degrees_dir,
        config_file,
        graph_file,
        reference_user: config.reference_user,
    })
}

/// Check if a directory has been initialized with degrees.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(DEGREES_DIR_NAME).exists()
}

/// Find the degrees root directory by searching up the directory tree.
///
/// Returns `Some(path)` with the directory containing `.degrees/`, or `None`
/// if none is found within [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_degrees_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(DEGREES_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
