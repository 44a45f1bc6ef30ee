//! Configuration management for degrees.
//!
//! Configuration lives in `.degrees/config.yaml`:
//!
//! ```yaml
//! reference-user: 1
//! storage:
//!   backend: memory
//!   data_file: .degrees/graph.jsonl
//! search:
//!   max_concurrent_lookups: 16
//!   max_depth: null
//!   timeout_ms: null
//! ```

use crate::domain::UserId;
use crate::error::{ConfigError, Error, Result};
use crate::service::{DEFAULT_MAX_CONCURRENT_LOOKUPS, SearchOptions};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

/// Name of the degrees directory
pub const DEGREES_DIR_NAME: &str = ".degrees";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the graph data file
pub const GRAPH_FILE_NAME: &str = "graph.jsonl";

/// Reference user when none is given to `init`
pub const DEFAULT_REFERENCE_USER: i64 = 1;

/// Configuration file structure for degrees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DegreesConfig {
    /// The user all degrees of separation are measured from
    #[serde(rename = "reference-user")]
    pub reference_user: UserId,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Search limits
    #[serde(default)]
    pub search: SearchConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("memory" for in-memory with JSONL persistence)
    pub backend: String,

    /// Path to the data file, relative to the repository root
    pub data_file: String,
}

/// Search configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Neighbor lookups in flight per frontier round
    #[serde(default = "default_concurrency")]
    pub max_concurrent_lookups: usize,

    /// Optional depth limit for degree searches
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Optional time budget per search, in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENT_LOOKUPS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            max_depth: None,
            timeout_ms: None,
        }
    }
}

impl SearchConfig {
    /// Build search options from this section.
    pub fn to_options(&self) -> SearchOptions {
        let mut options =
            SearchOptions::default().with_max_concurrent_lookups(self.max_concurrent_lookups);
        if let Some(depth) = self.max_depth {
            options = options.with_max_depth(depth);
        }
        if let Some(ms) = self.timeout_ms {
            options = options.with_timeout(Duration::from_millis(ms));
        }
        options
    }
}

impl StorageConfig {
    /// Resolve this section into a backend, relative to `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownBackend` for anything but `memory`.
    pub fn to_backend(&self, root_dir: &Path) -> Result<StorageBackend> {
        match self.backend.as_str() {
            "memory" => Ok(StorageBackend::Jsonl(root_dir.join(&self.data_file))),
            other => Err(ConfigError::UnknownBackend(other.to_string()).into()),
        }
    }
}

impl DegreesConfig {
    /// Create a new configuration with the given reference user
    pub fn new(reference_user: UserId) -> Self {
        Self {
            reference_user,
            storage: StorageConfig {
                backend: "memory".to_string(),
                data_file: format!("{DEGREES_DIR_NAME}/{GRAPH_FILE_NAME}"),
            },
            search: SearchConfig::default(),
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the reference user is not positive
    /// or the lookup concurrency is zero.
    pub fn validate(&self) -> Result<()> {
        validate_reference_user(self.reference_user.get())?;
        if self.search.max_concurrent_lookups == 0 {
            return Err(ConfigError::Invalid(
                "search.max_concurrent_lookups must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, and
    /// `ConfigError::Invalid` if it is not valid YAML or fails [`validate`](Self::validate).
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::from(ConfigError::Invalid(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if serialization fails and `Error::Io`
    /// if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::from(ConfigError::Invalid(format!("YAML error: {e}"))))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for DegreesConfig {
    fn default() -> Self {
        Self::new(UserId(DEFAULT_REFERENCE_USER))
    }
}

/// Validate a reference user ID.
///
/// User IDs are positive integers everywhere they are entered, so the
/// reference user follows the same rule.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for zero or negative IDs.
pub fn validate_reference_user(id: i64) -> Result<()> {
    if id < 1 {
        return Err(ConfigError::Invalid(format!(
            "reference-user must be a positive user ID, got {id}"
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = DegreesConfig::new(UserId(7));
        assert_eq!(config.reference_user, UserId(7));
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.storage.data_file, ".degrees/graph.jsonl");
        assert_eq!(config.search, SearchConfig::default());
    }

    #[tokio::test]
    async fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let mut original = DegreesConfig::new(UserId(3));
        original.search.max_depth = Some(6);
        original.save(&config_path).await.unwrap();

        let loaded = DegreesConfig::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_yaml_format() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        DegreesConfig::new(UserId(1)).save(&config_path).await.unwrap();
        let content = tokio::fs::read_to_string(&config_path).await.unwrap();

        assert!(content.contains("reference-user: 1"));
        assert!(content.contains("backend: memory"));
        assert!(content.contains("data_file: .degrees/graph.jsonl"));
        assert!(content.contains("max_concurrent_lookups: 16"));
    }

    #[tokio::test]
    async fn test_search_section_is_optional() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(
            &config_path,
            "reference-user: 4\nstorage:\n  backend: memory\n  data_file: g.jsonl\n",
        )
        .await
        .unwrap();

        let config = DegreesConfig::load(&config_path).await.unwrap();
        assert_eq!(config.reference_user, UserId(4));
        assert_eq!(config.search, SearchConfig::default());
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-3)]
    fn test_reference_user_must_be_positive(#[case] id: i64) {
        let err = validate_reference_user(id).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = DegreesConfig::default();
        config.search.max_concurrent_lookups = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_backend() {
        let config = DegreesConfig::default();
        let backend = config.storage.to_backend(Path::new("/repo")).unwrap();
        assert_eq!(
            backend,
            StorageBackend::Jsonl(PathBuf::from("/repo/.degrees/graph.jsonl"))
        );

        let unknown = StorageConfig {
            backend: "postgres".to_string(),
            data_file: String::new(),
        };
        let err = unknown.to_backend(Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("Unknown storage backend 'postgres'"));
    }

    #[test]
    fn test_search_config_to_options() {
        let search = SearchConfig {
            max_concurrent_lookups: 4,
            max_depth: Some(3),
            timeout_ms: Some(250),
        };
        let options = search.to_options();
        assert_eq!(options.max_concurrent_lookups, 4);
        assert_eq!(options.max_depth, Some(3));
        assert_eq!(options.timeout, Some(Duration::from_millis(250)));
    }
}
