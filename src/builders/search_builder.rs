//! src/builders/search_builder.rs
//! Search configuration builder

use std::io::BufRead;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::error::BruteError;
use crate::oracle::Oracle;
use crate::search::{spawn_search, SearchResults};
use crate::utils::effective_concurrency;

/// Configures and starts a bounded search.
///
/// Defaults: host parallelism, no deadline.
///
/// # Thread Safety
///
/// This type is **thread-safe** (`Send + Sync`) and cheap to clone; one builder
/// can start any number of independent searches.
#[derive(Debug, Clone, Default)]
pub struct SearchBuilder {
    concurrency: usize,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl SearchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on simultaneous oracle invocations. `0` restores the host default.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Cancel the search `timeout` after [`start`](Self::start) is called.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Cancel the search once `deadline` passes.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Effective concurrency (requested value, or the host default for `0`).
    #[must_use]
    pub fn concurrency(&self) -> usize {
        effective_concurrency(self.concurrency)
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The earlier of the fixed deadline and `now + timeout`.
    fn effective_deadline(&self) -> Option<Instant> {
        let from_timeout = self.timeout.and_then(|t| Instant::now().checked_add(t));
        match (self.deadline, from_timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Start searching `candidates` against `oracle`.
    ///
    /// The search observes `cancel` and, if configured, the deadline; neither
    /// the deadline nor dropping the returned stream cancels `cancel` itself.
    ///
    /// # Errors
    ///
    /// - [`BruteError::Pool`] if the worker pool cannot be built
    /// - [`BruteError::Io`] if the feeder thread cannot be spawned
    pub fn start<O, R>(
        &self,
        oracle: Arc<O>,
        candidates: R,
        cancel: &CancelToken,
    ) -> Result<SearchResults, BruteError>
    where
        O: Oracle + ?Sized + 'static,
        R: BufRead + Send + 'static,
    {
        let token = match self.effective_deadline() {
            Some(deadline) => cancel.with_deadline(deadline),
            None => cancel.child(),
        };
        spawn_search(oracle, candidates, self.concurrency(), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_host_parallelism() {
        let builder = SearchBuilder::new();
        assert!(builder.concurrency() >= 1);
        assert!(builder.deadline().is_none());
    }

    #[test]
    fn explicit_concurrency_is_kept() {
        assert_eq!(SearchBuilder::new().with_concurrency(8).concurrency(), 8);
        assert_eq!(
            SearchBuilder::new().with_concurrency(8).with_concurrency(0).concurrency(),
            crate::utils::default_concurrency()
        );
    }

    #[test]
    fn timeout_is_measured_from_start() {
        let before = Instant::now();
        let builder = SearchBuilder::new().with_timeout(Duration::from_secs(5));
        assert_eq!(builder.timeout(), Some(Duration::from_secs(5)));
        assert!(builder.deadline().is_none());
        assert!(builder.effective_deadline().is_some_and(|d| d > before));
    }

    #[test]
    fn earlier_limit_wins() {
        let soon = Instant::now() + Duration::from_millis(10);
        let builder = SearchBuilder::new()
            .with_timeout(Duration::from_secs(60))
            .with_deadline(soon);
        assert_eq!(builder.effective_deadline(), Some(soon));
    }
}
