//! Core in-memory storage data structures.
//!
//! This module contains the inner storage structure that holds all data
//! and is wrapped in `Arc<Mutex<>>` for thread safety.

use crate::domain::{Connection, User, UserId};
use crate::error::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Inner storage structure (not thread-safe).
///
/// # Graph Representation
///
/// Each user is a node holding its `UserId`; each connection is a single
/// undirected edge. `users` and `node_map` always hold the same key set.
pub(crate) struct InMemoryStoreInner {
    /// Users indexed by ID for O(1) lookups
    pub(super) users: HashMap<UserId, User>,

    /// Undirected connection graph.
    pub(super) graph: UnGraph<UserId, ()>,

    /// Mapping from UserId to graph NodeIndex.
    pub(super) node_map: HashMap<UserId, NodeIndex>,
}

impl InMemoryStoreInner {
    /// Create a new empty storage instance
    pub(crate) fn new() -> Self {
        Self {
            users: HashMap::new(),
            graph: UnGraph::new_undirected(),
            node_map: HashMap::new(),
        }
    }

    pub(super) fn add_user(&mut self, user: User) -> Result<User> {
        if self.users.contains_key(&user.id) {
            return Err(Error::DuplicateUser(user.id));
        }

        let node = self.graph.add_node(user.id);
        self.node_map.insert(user.id, node);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Insert an undirected edge, returning `false` if it already existed.
    pub(super) fn insert_edge(&mut self, a: UserId, b: UserId) -> Result<bool> {
        if a == b {
            return Err(Error::SelfConnection(a));
        }
        let a_node = *self.node_map.get(&a).ok_or(Error::UserNotFound(a))?;
        let b_node = *self.node_map.get(&b).ok_or(Error::UserNotFound(b))?;

        // find_edge on an undirected graph matches either orientation
        if self.graph.find_edge(a_node, b_node).is_some() {
            return Ok(false);
        }

        self.graph.add_edge(a_node, b_node, ());
        Ok(true)
    }

    /// Direct neighbors of `id`, sorted by ID. Unknown IDs have none.
    pub(super) fn neighbors(&self, id: UserId) -> Vec<User> {
        let Some(&node) = self.node_map.get(&id) else {
            return Vec::new();
        };

        let mut neighbors: Vec<User> = self
            .graph
            .neighbors(node)
            .filter_map(|n| self.users.get(&self.graph[n]).cloned())
            .collect();
        neighbors.sort_by_key(|u| u.id);
        neighbors
    }

    pub(super) fn users_sorted(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    pub(super) fn connections_sorted(&self) -> Vec<Connection> {
        let mut connections: Vec<Connection> = self
            .graph
            .edge_references()
            .filter_map(|e| Connection::new(self.graph[e.source()], self.graph[e.target()]))
            .collect();
        connections.sort_by_key(|c| (c.a, c.b));
        connections
    }
}
