//! src/search/results.rs
//! Result stream handed back to the caller of a search

use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::candidate::Candidate;
use crate::error::BruteError;
use crate::search::FeedReport;

/// The stream of candidates the oracle accepted.
///
/// Yields successful candidates in completion order, then `None` once the
/// feeder has stopped and every admitted unit of work has finished. Once it has
/// returned `None` it keeps returning `None` without blocking.
///
/// Delivery is a rendezvous: a worker that found a match waits until it is
/// received here, holding its admission slot. A caller that stops reading
/// therefore stalls the search instead of buffering results.
///
/// Dropping the stream stops admission and abandons any undelivered matches.
#[must_use = "dropping the result stream abandons the search"]
pub struct SearchResults {
    rx: Receiver<Candidate>,
    feeder: Option<JoinHandle<Result<FeedReport, BruteError>>>,
    stop: CancelToken,
}

impl SearchResults {
    pub(crate) fn new(
        rx: Receiver<Candidate>,
        feeder: JoinHandle<Result<FeedReport, BruteError>>,
        stop: CancelToken,
    ) -> Self {
        Self {
            rx,
            feeder: Some(feeder),
            stop,
        }
    }

    /// Block until the next match arrives, or return `None` once the search is over.
    pub fn recv(&self) -> Option<Candidate> {
        self.rx.recv().ok()
    }

    /// Return a match that is ready right now, without blocking.
    pub fn try_recv(&self) -> Option<Candidate> {
        self.rx.try_recv().ok()
    }

    /// Stop admitting new candidates.
    ///
    /// Units of work already past their cancellation check still run, and their
    /// matches are still delivered. The caller's own token is not affected.
    pub fn cancel(&self) {
        self.stop.cancel();
    }

    /// Stop admitting new candidates, discard undelivered matches and wait for
    /// the feeder to shut down.
    ///
    /// Call this after draining the stream to obtain the [`FeedReport`].
    ///
    /// # Errors
    ///
    /// - [`BruteError::Io`] if reading the candidate stream failed
    /// - [`BruteError::WorkerPanicked`] if an oracle invocation panicked
    pub fn finish(mut self) -> Result<FeedReport, BruteError> {
        self.stop.cancel();

        let discarded = self.rx.iter().count();
        if discarded > 0 {
            debug!(discarded, "late matches discarded");
        }

        match self.feeder.take() {
            Some(handle) => handle.join().map_err(|_| BruteError::WorkerPanicked)?,
            None => unreachable!("feeder handle is only taken by finish"),
        }
    }
}

impl Iterator for SearchResults {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        self.recv()
    }
}

impl Drop for SearchResults {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
