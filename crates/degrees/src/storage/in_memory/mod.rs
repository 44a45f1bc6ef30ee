//! In-memory storage backend using HashMap and petgraph.
//!
//! This module provides a fast, **ephemeral** storage implementation where all
//! data is held in RAM and **lost when the process exits**. It is suitable for:
//!
//! - Testing and development
//! - Short-lived CLI sessions
//! - Backing the JSONL file store
//!
//! # Persistence
//!
//! Data can be loaded from and saved to disk with [`load_from_jsonl`] and
//! [`save_to_jsonl`]. The trait's `save()` method is a no-op for the plain
//! in-memory store.
//!
//! # Architecture
//!
//! The implementation uses:
//! - `HashMap<UserId, User>` for O(1) user lookups
//! - `petgraph::UnGraph` for the connection graph; one undirected edge per
//!   connected pair, so neighbor lookup from either endpoint sees the other
//! - `HashMap<UserId, NodeIndex>` for mapping users to graph nodes
//!
//! # Thread Safety
//!
//! The storage is wrapped in `Arc<Mutex<InMemoryStoreInner>>`. Every operation
//! acquires the lock, so edge insertion is serialized.
//!
//! # Performance Characteristics
//!
//! - Find user: O(1)
//! - Immediate connections: O(d log d) where d is the user's degree (sorted)
//! - Insert edge: O(min(d_a, d_b)) duplicate check via `find_edge`

mod inner;
mod jsonl;
mod trait_impl;

use crate::storage::GraphStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub(crate) use inner::InMemoryStoreInner;
pub(crate) use jsonl::load_inner;

// Re-export public API
pub use jsonl::{LoadWarning, load_from_jsonl, save_to_jsonl};

/// Thread-safe in-memory storage.
///
/// Implements [`GraphStore`] via the trait implementation in `trait_impl.rs`.
pub(crate) type InMemoryStore = Arc<Mutex<InMemoryStoreInner>>;

pub(crate) fn wrap(inner: InMemoryStoreInner) -> InMemoryStore {
    Arc::new(Mutex::new(inner))
}

/// Create a new, empty in-memory store.
///
/// # Example
///
/// ```
/// use degrees::storage::in_memory::new_in_memory_store;
///
/// let store = new_in_memory_store();
/// // Use store...
/// ```
pub fn new_in_memory_store() -> Arc<dyn GraphStore> {
    Arc::new(wrap(InMemoryStoreInner::new()))
}
