//! # Bounded Search Engine
//!
//! Core API: [`search`] (or [`SearchBuilder::start`](crate::SearchBuilder::start))
//! reads candidates line by line, tests each one against an [`Oracle`] on a
//! worker pool, and streams every accepted candidate back through
//! [`SearchResults`].
//!
//! ## Threads
//!
//! - one feeder thread reads the wordlist and admits candidates in order
//! - a rayon pool of `concurrency` workers runs the oracle
//! - the caller drains [`SearchResults`]
//!
//! ## Guarantees
//!
//! - at most `concurrency` oracle invocations run at once ([`SlotPool`])
//! - the result stream closes only after every admitted unit of work finished
//! - cancellation stops admission and keeps queued units from calling the
//!   oracle; invocations already running are never interrupted
//! - without cancellation every accepted candidate is delivered exactly once

mod feeder;
mod results;
mod slots;
mod worker;

pub use feeder::CandidateFeeder;
pub use results::SearchResults;
pub use slots::{SlotGuard, SlotPool};

use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::builders::SearchBuilder;
use crate::cancel::CancelToken;
use crate::consts::{FEEDER_THREAD_NAME, WORKER_THREAD_PREFIX};
use crate::error::BruteError;
use crate::oracle::Oracle;

/// Why the feeder stopped admitting candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The candidate stream ended.
    Exhausted,
    /// The cancellation token (or its deadline) fired.
    Cancelled,
}

/// Summary of one search, available from [`SearchResults::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedReport {
    /// Records read from the candidate stream.
    pub read: u64,
    /// Records that were handed to a unit of work.
    pub admitted: u64,
    pub stop: StopReason,
}

/// Search `candidates` for every value `oracle` accepts.
///
/// - `concurrency`: maximum simultaneous oracle invocations; `0` picks the
///   host's available parallelism
/// - `cancel`: externally owned stop request; cancelling it stops admission
///
/// Returns immediately; the search runs on background threads.
///
/// # Errors
///
/// - [`BruteError::Pool`] if the worker pool cannot be built
/// - [`BruteError::Io`] if the feeder thread cannot be spawned
///
/// # Example
///
/// ```
/// use keybrute::{search, CancelToken, Rejection};
/// use std::io::Cursor;
/// use std::sync::Arc;
///
/// let oracle = Arc::new(|c: &[u8]| {
///     if c == b"test" { Ok(()) } else { Err(Rejection::Candidate("no")) }
/// });
/// let words = Cursor::new(b"some\nstupid\ntest\npasswords".to_vec());
///
/// let found: Vec<_> = search(oracle, words, 4, &CancelToken::new())?
///     .map(|c| c.as_bytes().to_vec())
///     .collect();
/// assert_eq!(found, vec![b"test".to_vec()]);
/// # Ok::<(), keybrute::BruteError>(())
/// ```
pub fn search<O, R>(
    oracle: Arc<O>,
    candidates: R,
    concurrency: usize,
    cancel: &CancelToken,
) -> Result<SearchResults, BruteError>
where
    O: Oracle + ?Sized + 'static,
    R: BufRead + Send + 'static,
{
    SearchBuilder::new()
        .with_concurrency(concurrency)
        .start(oracle, candidates, cancel)
}

/// Spawn the worker pool and the feeder thread. `concurrency` must be ≥ 1.
pub(crate) fn spawn_search<O, R>(
    oracle: Arc<O>,
    candidates: R,
    concurrency: usize,
    cancel: CancelToken,
) -> Result<SearchResults, BruteError>
where
    O: Oracle + ?Sized + 'static,
    R: BufRead + Send + 'static,
{
    let workers = ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .thread_name(|i| format!("{WORKER_THREAD_PREFIX}-{i}"))
        .build()
        .map_err(|e| BruteError::Pool(e.to_string()))?;

    // Capacity 0: every match is a rendezvous with the caller.
    let (tx, rx) = bounded(0);
    let stop = cancel.child();
    let feeder_stop = stop.clone();

    info!(concurrency, "search started");

    let feeder = thread::Builder::new()
        .name(FEEDER_THREAD_NAME.to_string())
        .spawn(move || {
            let slots = SlotPool::new(concurrency);
            let report = feeder::admit_all(
                CandidateFeeder::new(candidates),
                &workers,
                &slots,
                &*oracle,
                &feeder_stop,
                &tx,
            );
            // Every unit of work has returned: closing now loses nothing.
            drop(tx);
            if let Ok(report) = &report {
                info!(read = report.read, admitted = report.admitted, stop = ?report.stop, "search finished");
            }
            report.map_err(BruteError::from)
        })?;

    Ok(SearchResults::new(rx, feeder, stop))
}
