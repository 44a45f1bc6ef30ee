//! Storage abstraction layer for degrees.
//!
//! This module provides the graph store trait consumed by the connection
//! service and a factory for creating storage backends:
//!
//! - **In-memory**: Fast, ephemeral storage backed by HashMap and petgraph
//! - **JSONL**: Persistent file-based storage using JSON Lines format
//!
//! # Architecture
//!
//! The store is only ever queried one neighborhood at a time. Nothing above
//! this layer holds the whole graph, so a backend may equally be a remote
//! database. All methods take `&self`; implementations use interior
//! mutability so that a single store can be shared (`Arc<dyn GraphStore>`)
//! by concurrent frontier lookups.
//!
//! # Test Utilities
//!
//! A stateless [`MockStore`] is available behind the `test-util` feature:
//!
//! ```toml
//! [dev-dependencies]
//! degrees = { version = "...", features = ["test-util"] }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use degrees::domain::{User, UserId};
//! use degrees::storage::{create_store, StorageBackend};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = create_store(StorageBackend::InMemory).await?;
//!
//!     store.add_user(User::new(1, "Ada")).await?;
//!     store.add_user(User::new(2, "Grace")).await?;
//!     store.insert_edge(UserId(1), UserId(2)).await?;
//!
//!     let neighbors = store.immediate_connections(UserId(1)).await?;
//!     assert_eq!(neighbors.len(), 1);
//!     Ok(())
//! }
//! ```

use crate::domain::{Connection, User, UserId};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Storage backend implementations
pub mod in_memory;

/// Core storage trait for the connection graph.
///
/// Implementations must be `Send + Sync` so a single store can serve
/// concurrent lookups issued by one traversal round.
///
/// # Method Categories
///
/// - **Graph**: `find_user`, `immediate_connections`, `insert_edge`
/// - **Provisioning**: `add_user`
/// - **Batch Operations**: `export_users`, `export_connections`
/// - **Persistence**: `save`, `reload`
///
/// # Error Handling
///
/// Read methods return `Err` when the backend fails; a missing user is
/// `Ok(None)` / `Ok(vec![])`, never an error. Callers decide whether a read
/// failure is fatal.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ========== Graph Operations ==========

    /// Look up a user by ID.
    ///
    /// Returns `None` if the user doesn't exist.
    async fn find_user(&self, id: UserId) -> Result<Option<User>>;

    /// Get the users directly connected to `id`.
    ///
    /// Returns an empty vector for unknown IDs and for users without
    /// connections.
    async fn immediate_connections(&self, id: UserId) -> Result<Vec<User>>;

    /// Insert a symmetric connection between two users.
    ///
    /// The edge is written once and is visible from both endpoints.
    /// Inserting an existing pair is a no-op that returns `Ok(false)`;
    /// `Ok(true)` means a new edge was written.
    ///
    /// # Errors
    ///
    /// - `Error::SelfConnection` if `a == b`
    /// - `Error::UserNotFound` if either endpoint doesn't exist
    async fn insert_edge(&self, a: UserId, b: UserId) -> Result<bool>;

    // ========== Provisioning ==========

    /// Add a new user.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateUser` if a user with the same ID exists
    async fn add_user(&self, user: User) -> Result<User>;

    // ========== Batch Operations ==========

    /// Export all users, ordered by ID.
    async fn export_users(&self) -> Result<Vec<User>>;

    /// Export all connections, each edge once and normalized (`a < b`).
    async fn export_connections(&self) -> Result<Vec<Connection>>;

    // ========== Persistence ==========

    /// Save changes to persistent storage.
    ///
    /// For in-memory storage this is a no-op. For JSONL backing it writes
    /// the file atomically.
    async fn save(&self) -> Result<()>;

    /// Reload state from persistent storage, discarding unsaved changes.
    ///
    /// - **JSONL backend**: Re-reads the file and rebuilds in-memory state
    /// - **In-memory only**: No-op
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    async fn reload(&self) -> Result<()>;
}

/// Storage backend configuration.
///
/// Determines which storage implementation to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// JSONL file storage (persistent)
    Jsonl(PathBuf),
}

impl StorageBackend {
    /// Returns the data file path for file-based backends.
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StorageBackend::Jsonl(path) => Some(path),
            StorageBackend::InMemory => None,
        }
    }
}

/// Wrapper that adds JSONL file persistence to the in-memory store.
struct JsonlBackedStore {
    inner: in_memory::InMemoryStore,
    path: PathBuf,
}

#[async_trait]
impl GraphStore for JsonlBackedStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn immediate_connections(&self, id: UserId) -> Result<Vec<User>> {
        self.inner.immediate_connections(id).await
    }

    async fn insert_edge(&self, a: UserId, b: UserId) -> Result<bool> {
        self.inner.insert_edge(a, b).await
    }

    async fn add_user(&self, user: User) -> Result<User> {
        self.inner.add_user(user).await
    }

    async fn export_users(&self) -> Result<Vec<User>> {
        self.inner.export_users().await
    }

    async fn export_connections(&self) -> Result<Vec<Connection>> {
        self.inner.export_connections().await
    }

    async fn save(&self) -> Result<()> {
        in_memory::save_to_jsonl(&self.inner, &self.path).await
    }

    async fn reload(&self) -> Result<()> {
        let fresh = if self.path.exists() {
            let (fresh, warnings) = in_memory::load_inner(&self.path).await?;
            log_load_warnings(&warnings);
            fresh
        } else {
            // File doesn't exist - reset to empty storage
            in_memory::InMemoryStoreInner::new()
        };
        *self.inner.lock().await = fresh;
        Ok(())
    }
}

fn log_load_warnings(warnings: &[in_memory::LoadWarning]) {
    for warning in warnings {
        tracing::warn!(warning = %warning, "JSONL load warning");
    }
}

/// Create a storage instance for the given backend.
///
/// # Errors
///
/// - `Error::Io` if the JSONL file exists but cannot be read
pub async fn create_store(backend: StorageBackend) -> Result<Arc<dyn GraphStore>> {
    match backend {
        StorageBackend::InMemory => Ok(in_memory::new_in_memory_store()),
        StorageBackend::Jsonl(path) => {
            let inner = if path.exists() {
                let (inner, warnings) = in_memory::load_inner(&path).await?;
                // Warnings are non-fatal; the store is still usable
                log_load_warnings(&warnings);
                inner
            } else {
                // File doesn't exist yet (first run)
                in_memory::InMemoryStoreInner::new()
            };
            Ok(Arc::new(JsonlBackedStore {
                inner: in_memory::wrap(inner),
                path,
            }))
        }
    }
}

// ========== Test Utilities ==========

/// The only user ID known to [`MockStore`].
#[cfg(any(test, feature = "test-util"))]
pub const MOCK_USER_ID: UserId = UserId(1);

/// Stateless mock implementation of [`GraphStore`] for testing.
///
/// # Behavior
///
/// - `find_user`: Returns `Some` only for [`MOCK_USER_ID`]
/// - `immediate_connections`, `export_*`: Return empty vectors
/// - `save`, `reload`: No-ops
/// - `insert_edge`, `add_user`: Unimplemented (will panic if called)
///
/// Use [`in_memory::new_in_memory_store`] when tests need real data.
#[cfg(any(test, feature = "test-util"))]
#[derive(Clone, Copy, Default)]
#[non_exhaustive]
pub struct MockStore;

#[cfg(any(test, feature = "test-util"))]
impl MockStore {
    /// Create a new MockStore instance.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl GraphStore for MockStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok((id == MOCK_USER_ID).then(|| User {
            id,
            name: "Mock User".to_string(),
        }))
    }

    async fn immediate_connections(&self, _id: UserId) -> Result<Vec<User>> {
        Ok(vec![])
    }

    async fn insert_edge(&self, _a: UserId, _b: UserId) -> Result<bool> {
        unimplemented!(
            "MockStore::insert_edge() is not implemented. \
             Use in_memory::new_in_memory_store() for real edges."
        )
    }

    async fn add_user(&self, _user: User) -> Result<User> {
        unimplemented!(
            "MockStore::add_user() is not implemented. \
             Use in_memory::new_in_memory_store() for real users."
        )
    }

    async fn export_users(&self) -> Result<Vec<User>> {
        Ok(vec![])
    }

    async fn export_connections(&self) -> Result<Vec<Connection>> {
        Ok(vec![])
    }

    async fn save(&self) -> Result<()> {
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        Ok(())
    }
}
