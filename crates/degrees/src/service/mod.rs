//! Connection service: neighbor listing, degree of separation and connect.
//!
//! The service is stateless apart from a shared handle to the store and the
//! configured reference user. Every call owns its traversal state, so one
//! service value can serve any number of concurrent callers.
//!
//! # Degree search
//!
//! Degrees are computed by level-synchronous breadth-first search against
//! the store, one neighborhood lookup per visited user:
//!
//! 1. The reference user is visited at distance 0 and forms the frontier.
//! 2. Every user in the frontier is expanded (lookups run concurrently, up
//!    to `max_concurrent_lookups`, and are all joined before continuing).
//! 3. Unvisited neighbors are recorded at distance + 1 and become the next
//!    frontier. The search ends when the target is recorded or the frontier
//!    is empty.
//!
//! A user is expanded at most once, which bounds the number of store calls
//! by the number of distinct users reached.
//!
//! # Store failures
//!
//! Read failures are absorbed: a failed lookup is logged and treated as "no
//! connections" for that user, and the search continues with the rest of
//! the frontier. A transient failure is therefore indistinguishable from a
//! genuinely disconnected user. Write failures are returned to the caller.

mod options;
mod traversal;

pub use options::{CancellationToken, DEFAULT_MAX_CONCURRENT_LOOKUPS, SearchOptions};

use crate::domain::{ConnectOutcome, Degree, User, UserId};
use crate::error::{Error, Result};
use crate::storage::GraphStore;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::time::Instant;
use traversal::Traversal;

/// Answers connection queries relative to a fixed reference user.
#[derive(Clone)]
pub struct ConnectionService {
    store: Arc<dyn GraphStore>,
    reference: UserId,
    options: SearchOptions,
}

impl std::fmt::Debug for ConnectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionService")
            .field("reference", &self.reference)
            .field("options", &self.options)
            .field("store", &"<dyn GraphStore>")
            .finish()
    }
}

impl ConnectionService {
    /// Create a service measuring degrees from `reference`.
    pub fn new(store: Arc<dyn GraphStore>, reference: UserId) -> Self {
        Self {
            store,
            reference,
            options: SearchOptions::default(),
        }
    }

    /// Replace the default search options used by
    /// [`connection_degree`](Self::connection_degree) and
    /// [`connection_path`](Self::connection_path).
    #[must_use]
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// The user all degrees are measured from.
    pub fn reference(&self) -> UserId {
        self.reference
    }

    /// Default search options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Users directly connected to `id`.
    ///
    /// Never fails: an unknown user, a user without connections and a store
    /// failure all yield an empty vector.
    pub async fn connections(&self, id: UserId) -> Vec<User> {
        self.neighbors_or_empty(id).await
    }

    /// Degree of separation between the reference user and `target`.
    pub async fn connection_degree(&self, target: UserId) -> Degree {
        self.connection_degree_with(target, &self.options).await
    }

    /// Degree of separation using explicit search options.
    pub async fn connection_degree_with(&self, target: UserId, options: &SearchOptions) -> Degree {
        let traversal = self.search(target, options).await;
        Degree::from(traversal.and_then(|t| t.distance(target)))
    }

    /// Shortest path from the reference user to `target`, both included.
    ///
    /// Returns `None` exactly when [`connection_degree`](Self::connection_degree)
    /// would report [`Degree::NoPath`].
    pub async fn connection_path(&self, target: UserId) -> Option<Vec<UserId>> {
        self.connection_path_with(target, &self.options).await
    }

    /// Shortest path using explicit search options.
    pub async fn connection_path_with(
        &self,
        target: UserId,
        options: &SearchOptions,
    ) -> Option<Vec<UserId>> {
        self.search(target, options)
            .await
            .and_then(|t| t.path_to(target))
    }

    /// Connect two users.
    ///
    /// Both users are looked up first; nothing is written unless both
    /// exist. The edge is then persisted with a single store request.
    /// Connecting an already-connected pair succeeds with
    /// [`ConnectOutcome::AlreadyConnected`].
    ///
    /// # Errors
    ///
    /// - `Error::UserNotFound` naming the first missing ID in argument order
    /// - `Error::SelfConnection` if `a == b`
    /// - `Error::StoreUnavailable` if a lookup or the write fails
    pub async fn connect(&self, a: UserId, b: UserId) -> Result<ConnectOutcome> {
        let (first, second) = futures::join!(self.store.find_user(a), self.store.find_user(b));

        if first.map_err(unavailable)?.is_none() {
            return Err(Error::UserNotFound(a));
        }
        if second.map_err(unavailable)?.is_none() {
            return Err(Error::UserNotFound(b));
        }
        if a == b {
            return Err(Error::SelfConnection(a));
        }

        let inserted = self.store.insert_edge(a, b).await.map_err(unavailable)?;
        if inserted {
            tracing::info!(%a, %b, "Connected users");
            Ok(ConnectOutcome::Connected)
        } else {
            tracing::debug!(%a, %b, "Users already connected");
            Ok(ConnectOutcome::AlreadyConnected)
        }
    }

    /// Run the breadth-first search, returning the traversal if `target`
    /// was reached.
    async fn search(&self, target: UserId, options: &SearchOptions) -> Option<Traversal> {
        let mut traversal = Traversal::new(self.reference);
        if target == self.reference {
            return Some(traversal);
        }

        let deadline = options.effective_deadline(Instant::now());

        while !traversal.is_exhausted() {
            if options.is_cancelled() {
                tracing::warn!(%target, depth = traversal.depth(), "Degree search cancelled");
                return None;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                tracing::warn!(
                    %target,
                    depth = traversal.depth(),
                    "Degree search deadline exceeded"
                );
                return None;
            }
            if options.max_depth.is_some_and(|max| traversal.depth() >= max) {
                tracing::debug!(
                    %target,
                    depth = traversal.depth(),
                    "Degree search reached max depth"
                );
                return None;
            }

            let frontier = traversal.take_frontier();
            let round = self.expand(&frontier, options.max_concurrent_lookups);
            let expansions = match deadline {
                Some(deadline) => {
                    let Ok(expansions) = tokio::time::timeout_at(deadline, round).await else {
                        tracing::warn!(
                            %target,
                            depth = traversal.depth(),
                            "Degree search deadline exceeded during frontier round"
                        );
                        return None;
                    };
                    expansions
                }
                None => round.await,
            };

            tracing::debug!(
                %target,
                depth = traversal.depth(),
                frontier = frontier.len(),
                visited = traversal.visited_count(),
                "Expanded frontier"
            );

            if traversal.advance(expansions, target) {
                return Some(traversal);
            }
        }

        None
    }

    /// Look up the neighbors of every frontier user, joined in frontier order.
    async fn expand(&self, frontier: &[UserId], concurrency: usize) -> Vec<(UserId, Vec<User>)> {
        stream::iter(frontier.iter().copied())
            .map(|id| async move { (id, self.neighbors_or_empty(id).await) })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    async fn neighbors_or_empty(&self, id: UserId) -> Vec<User> {
        match self.store.immediate_connections(id).await {
            Ok(neighbors) => neighbors,
            Err(e) => {
                tracing::warn!(
                    user = %id,
                    error = %e,
                    "Neighbor lookup failed; treating user as having no connections"
                );
                Vec::new()
            }
        }
    }
}

/// Keep domain errors as they are; anything else is the store failing.
fn unavailable(err: Error) -> Error {
    match err {
        Error::UserNotFound(_)
        | Error::SelfConnection(_)
        | Error::DuplicateUser(_)
        | Error::StoreUnavailable(_) => err,
        other => Error::StoreUnavailable(other.to_string()),
    }
}
