//! GraphStore trait implementation for in-memory storage.

use super::InMemoryStore;
use crate::domain::{Connection, User, UserId};
use crate::error::Result;
use crate::storage::GraphStore;
use async_trait::async_trait;

#[async_trait]
impl GraphStore for InMemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let inner = self.lock().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn immediate_connections(&self, id: UserId) -> Result<Vec<User>> {
        let inner = self.lock().await;
        Ok(inner.neighbors(id))
    }

    async fn insert_edge(&self, a: UserId, b: UserId) -> Result<bool> {
        let mut inner = self.lock().await;
        let inserted = inner.insert_edge(a, b)?;
        if inserted {
            tracing::debug!(%a, %b, "Inserted connection");
        }
        Ok(inserted)
    }

    async fn add_user(&self, user: User) -> Result<User> {
        let mut inner = self.lock().await;
        inner.add_user(user)
    }

    async fn export_users(&self) -> Result<Vec<User>> {
        let inner = self.lock().await;
        Ok(inner.users_sorted())
    }

    async fn export_connections(&self) -> Result<Vec<Connection>> {
        let inner = self.lock().await;
        Ok(inner.connections_sorted())
    }

    async fn save(&self) -> Result<()> {
        // Plain in-memory storage has nowhere to persist to
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        Ok(())
    }
}
