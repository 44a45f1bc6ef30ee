//! Domain types for the connection graph.
//!
//! This module contains the core domain types shared by the storage layer
//! and the connection service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Returns the raw integer value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A member of the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, enforced by the store
    pub id: UserId,

    /// Display name
    pub name: String,
}

impl User {
    /// Create a new user
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
        }
    }
}

/// A mutual connection between two distinct users.
///
/// The pair is unordered: `Connection::new(a, b)` and `Connection::new(b, a)`
/// produce equal values because the endpoints are normalized so that
/// `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// The lower of the two endpoint IDs
    pub a: UserId,

    /// The higher of the two endpoint IDs
    pub b: UserId,
}

impl Connection {
    /// Create a normalized connection between two users.
    ///
    /// Returns `None` when both endpoints are the same user, since a user
    /// cannot be connected to themselves.
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { a, b }),
            std::cmp::Ordering::Greater => Some(Self { a: b, b: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Degree of separation between the reference user and a target.
///
/// An unreachable target is `NoPath`, never `Separated(0)`; only the
/// reference user itself is at distance 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degree {
    /// Number of edges on the shortest path
    Separated(usize),

    /// The target is not reachable from the reference user
    NoPath,
}

impl Degree {
    /// Returns the distance in edges, or `None` if there is no path
    pub fn distance(self) -> Option<usize> {
        match self {
            Self::Separated(d) => Some(d),
            Self::NoPath => None,
        }
    }
}

impl From<Option<usize>> for Degree {
    fn from(distance: Option<usize>) -> Self {
        distance.map_or(Self::NoPath, Self::Separated)
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separated(d) => write!(f, "{d}"),
            Self::NoPath => write!(f, "no path"),
        }
    }
}

/// Result of a successful connect request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new connection was written
    Connected,

    /// The two users were already connected; nothing changed
    AlreadyConnected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ascending(1, 2)]
    #[case::descending(2, 1)]
    #[case::negative(-4, 7)]
    fn test_connection_is_normalized(#[case] x: i64, #[case] y: i64) {
        let conn = Connection::new(UserId(x), UserId(y)).unwrap();
        assert!(conn.a < conn.b);
        assert_eq!(conn, Connection::new(UserId(y), UserId(x)).unwrap());
    }

    #[test]
    fn test_self_connection_is_rejected() {
        assert!(Connection::new(UserId(3), UserId(3)).is_none());
    }

    #[test]
    fn test_no_path_is_not_zero() {
        assert_ne!(Degree::NoPath, Degree::Separated(0));
        assert_eq!(Degree::NoPath.distance(), None);
        assert_eq!(Degree::Separated(0).distance(), Some(0));
        assert_eq!(Degree::from(None), Degree::NoPath);
        assert_eq!(Degree::from(Some(2)), Degree::Separated(2));
    }

    #[test]
    fn test_user_serialization_shape() {
        let user = User::new(7, "Grace");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "Grace"}));
    }
}
