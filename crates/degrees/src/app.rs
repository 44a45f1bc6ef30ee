//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that loads configuration, opens the
//! store and builds the connection service for CLI commands.
//!
//! # Example
//!
//! ```no_run
//! use degrees::app::App;
//! use degrees::domain::UserId;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let degree = app.service().connection_degree(UserId(2)).await;
//!     println!("{degree}");
//!     Ok(())
//! }
//! ```

use crate::commands::init::find_degrees_root;
use crate::config::{CONFIG_FILE_NAME, DEGREES_DIR_NAME, DegreesConfig};
use crate::error::{ConfigError, Result};
use crate::service::ConnectionService;
use crate::storage::{GraphStore, StorageBackend, create_store};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application context for CLI operations.
pub struct App {
    store: Arc<dyn GraphStore>,
    service: ConnectionService,
    backend: StorageBackend,
    degrees_dir: PathBuf,
    config: DegreesConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("degrees_dir", &self.degrees_dir)
            .field("config", &self.config)
            .field("backend", &self.backend)
            .field("store", &"<dyn GraphStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.degrees/` directory,
    /// loads configuration, and opens the store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No degrees repository is found in the directory tree
    /// - Configuration cannot be loaded
    /// - Storage initialization fails
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_degrees_root(working_dir).ok_or(ConfigError::NotInitialized)?;

        let degrees_dir = root_dir.join(DEGREES_DIR_NAME);
        let config = DegreesConfig::load(&degrees_dir.join(CONFIG_FILE_NAME)).await?;

        let backend = config.storage.to_backend(&root_dir)?;
        let store = create_store(backend.clone()).await?;
        let service = ConnectionService::new(store.clone(), config.reference_user)
            .with_options(config.search.to_options());

        Ok(Self {
            store,
            service,
            backend,
            degrees_dir,
            config,
        })
    }

    /// The connection service.
    pub fn service(&self) -> &ConnectionService {
        &self.service
    }

    /// The underlying store, for provisioning and export.
    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    /// Loaded configuration.
    pub fn config(&self) -> &DegreesConfig {
        &self.config
    }

    /// The data file, for file-backed storage.
    pub fn data_path(&self) -> Option<&Path> {
        self.backend.data_path()
    }

    /// Path to the `.degrees` directory.
    pub fn degrees_dir(&self) -> &Path {
        &self.degrees_dir
    }

    /// Save storage state to persistent storage.
    ///
    /// This should be called after any mutating operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub async fn save(&self) -> Result<()> {
        self.store.save().await
    }
}
