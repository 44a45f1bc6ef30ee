//! Per-query limits for degree searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Default number of neighbor lookups in flight during one frontier round.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 16;

/// A token for cancelling an in-progress degree search.
///
/// Clones share the same flag, so the caller keeps one clone and hands
/// another to the search. Cancellation is observed between frontier rounds.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks if cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Limits applied to a single degree or path search.
///
/// An interrupted search (deadline passed, token cancelled, depth limit
/// reached) reports "no path" rather than an error.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum neighbor lookups in flight at once within a frontier round.
    pub max_concurrent_lookups: usize,

    /// Targets further than this many edges are reported as unreachable.
    pub max_depth: Option<usize>,

    /// Relative time budget, started when the search begins.
    pub timeout: Option<Duration>,

    /// Absolute deadline. Takes precedence over `timeout` when both are set.
    pub deadline: Option<Instant>,

    /// Caller-held cancellation token.
    pub cancel: Option<CancellationToken>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            max_depth: None,
            timeout: None,
            deadline: None,
            cancel: None,
        }
    }
}

impl SearchOptions {
    /// Set the lookup concurrency (values below 1 are treated as 1).
    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    /// Limit the search depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Give each search a relative time budget.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the search at a fixed instant.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Resolve the deadline for a search starting at `started`.
    pub(crate) fn effective_deadline(&self, started: Instant) -> Option<Instant> {
        self.deadline
            .or_else(|| self.timeout.map(|timeout| started + timeout))
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();

        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn concurrency_is_at_least_one() {
        let options = SearchOptions::default().with_max_concurrent_lookups(0);
        assert_eq!(options.max_concurrent_lookups, 1);
    }

    #[tokio::test]
    async fn deadline_takes_precedence_over_timeout() {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(5);
        let options = SearchOptions::default()
            .with_timeout(Duration::from_secs(60))
            .with_deadline(deadline);
        assert_eq!(options.effective_deadline(now), Some(deadline));

        let relative = SearchOptions::default().with_timeout(Duration::from_secs(1));
        assert_eq!(
            relative.effective_deadline(now),
            Some(now + Duration::from_secs(1))
        );
        assert_eq!(SearchOptions::default().effective_deadline(now), None);
    }

    #[test]
    fn cancellation_is_observed_through_options() {
        let token = CancellationToken::new();
        let options = SearchOptions::default().with_cancellation(token.clone());
        assert!(!options.is_cancelled());
        token.cancel();
        assert!(options.is_cancelled());
    }
}
