//! Breadth-first traversal state for a single search.
//!
//! The state is level-synchronous: the whole frontier at distance `d` is
//! expanded before anything at distance `d + 1`, so the first time a user is
//! visited is along a shortest path. A node's distance is recorded when it is
//! first seen and never revised.

use crate::domain::{User, UserId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Visit {
    distance: usize,
    parent: Option<UserId>,
}

/// Visited set, per-user distance and current frontier of one search.
#[derive(Debug)]
pub(crate) struct Traversal {
    visited: HashMap<UserId, Visit>,
    frontier: Vec<UserId>,
    depth: usize,
}

impl Traversal {
    /// Start a traversal at `origin` (distance 0).
    pub(crate) fn new(origin: UserId) -> Self {
        let mut visited = HashMap::new();
        visited.insert(
            origin,
            Visit {
                distance: 0,
                parent: None,
            },
        );
        Self {
            visited,
            frontier: vec![origin],
            depth: 0,
        }
    }

    /// Distance of the current frontier from the origin.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Move the current frontier out for expansion.
    pub(crate) fn take_frontier(&mut self) -> Vec<UserId> {
        std::mem::take(&mut self.frontier)
    }

    /// Record one round of neighbor lookups.
    ///
    /// `expansions` pairs each expanded user with the neighbors the store
    /// reported for it. Unvisited neighbors are recorded at `depth + 1` and
    /// form the next frontier. Returns `true` as soon as `target` is
    /// recorded; the rest of the round is left unexpanded since nothing in
    /// it can shorten the target's distance.
    pub(crate) fn advance<I>(&mut self, expansions: I, target: UserId) -> bool
    where
        I: IntoIterator<Item = (UserId, Vec<User>)>,
    {
        let distance = self.depth + 1;
        let mut next = Vec::new();

        for (parent, neighbors) in expansions {
            for neighbor in neighbors {
                if self.visited.contains_key(&neighbor.id) {
                    continue;
                }
                self.visited.insert(
                    neighbor.id,
                    Visit {
                        distance,
                        parent: Some(parent),
                    },
                );
                if neighbor.id == target {
                    self.depth = distance;
                    return true;
                }
                next.push(neighbor.id);
            }
        }

        self.frontier = next;
        self.depth = distance;
        false
    }

    /// Recorded distance of `id`, if it has been visited.
    pub(crate) fn distance(&self, id: UserId) -> Option<usize> {
        self.visited.get(&id).map(|v| v.distance)
    }

    /// Shortest path from the origin to `id`, origin first.
    pub(crate) fn path_to(&self, id: UserId) -> Option<Vec<UserId>> {
        let mut visit = self.visited.get(&id)?;
        let mut path = vec![id];
        while let Some(parent) = visit.parent {
            path.push(parent);
            visit = &self.visited[&parent];
        }
        path.reverse();
        Some(path)
    }

    /// Number of users visited so far.
    pub(crate) fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(ids: &[i64]) -> Vec<User> {
        ids.iter().map(|&id| User::new(id, format!("u{id}"))).collect()
    }

    #[test]
    fn origin_is_at_distance_zero() {
        let traversal = Traversal::new(UserId(1));
        assert_eq!(traversal.distance(UserId(1)), Some(0));
        assert_eq!(traversal.path_to(UserId(1)), Some(vec![UserId(1)]));
        assert_eq!(traversal.depth(), 0);
        assert!(!traversal.is_exhausted());
    }

    #[test]
    fn advance_records_next_level() {
        let mut traversal = Traversal::new(UserId(1));
        let frontier = traversal.take_frontier();
        assert_eq!(frontier, vec![UserId(1)]);

        let found = traversal.advance(vec![(UserId(1), users(&[2, 3]))], UserId(9));

        assert!(!found);
        assert_eq!(traversal.depth(), 1);
        assert_eq!(traversal.distance(UserId(2)), Some(1));
        assert_eq!(traversal.distance(UserId(3)), Some(1));
        assert_eq!(traversal.take_frontier(), vec![UserId(2), UserId(3)]);
    }

    #[test]
    fn visited_users_are_not_revisited() {
        let mut traversal = Traversal::new(UserId(1));
        traversal.take_frontier();
        traversal.advance(vec![(UserId(1), users(&[2, 3]))], UserId(9));
        traversal.take_frontier();

        // 2 and 3 see each other and the origin again; only 4 is new
        traversal.advance(
            vec![(UserId(2), users(&[1, 3, 4])), (UserId(3), users(&[1, 2, 4]))],
            UserId(9),
        );

        assert_eq!(traversal.distance(UserId(3)), Some(1));
        assert_eq!(traversal.distance(UserId(4)), Some(2));
        assert_eq!(traversal.take_frontier(), vec![UserId(4)]);
        assert_eq!(traversal.visited_count(), 4);
    }

    #[test]
    fn advance_stops_at_target() {
        let mut traversal = Traversal::new(UserId(1));
        traversal.take_frontier();

        let found = traversal.advance(vec![(UserId(1), users(&[2, 3, 4]))], UserId(3));

        assert!(found);
        assert_eq!(traversal.distance(UserId(3)), Some(1));
        assert_eq!(traversal.distance(UserId(4)), None);
    }

    #[test]
    fn path_follows_first_discovery() {
        let mut traversal = Traversal::new(UserId(1));
        traversal.take_frontier();
        traversal.advance(vec![(UserId(1), users(&[2, 3]))], UserId(5));
        traversal.take_frontier();
        traversal.advance(
            vec![(UserId(2), users(&[4])), (UserId(3), users(&[4]))],
            UserId(5),
        );
        traversal.take_frontier();
        traversal.advance(vec![(UserId(4), users(&[5]))], UserId(5));

        assert_eq!(
            traversal.path_to(UserId(5)),
            Some(vec![UserId(1), UserId(2), UserId(4), UserId(5)])
        );
        assert_eq!(traversal.path_to(UserId(42)), None);
    }

    #[test]
    fn empty_expansion_exhausts_frontier() {
        let mut traversal = Traversal::new(UserId(1));
        traversal.take_frontier();
        traversal.advance(vec![(UserId(1), Vec::new())], UserId(2));
        assert!(traversal.is_exhausted());
    }
}
