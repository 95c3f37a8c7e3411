//! src/search/worker.rs
//! One unit of work: test one candidate, forward it on success

use crossbeam_channel::Sender;
use tracing::{debug, trace, warn};

use crate::cancel::CancelToken;
use crate::candidate::Candidate;
use crate::oracle::Oracle;
use crate::search::slots::SlotGuard;

/// Invoke `oracle` once for `candidate` and forward it to `results` on success.
///
/// `_slot` is held for the whole call, including the (blocking) send, and is
/// released when this function returns.
pub(crate) fn test_candidate<O>(
    candidate: Candidate,
    _slot: SlotGuard<'_>,
    oracle: &O,
    cancel: &CancelToken,
    results: &Sender<Candidate>,
) where
    O: Oracle + ?Sized,
{
    if cancel.is_cancelled() {
        trace!("search cancelled; candidate skipped");
        return;
    }

    debug!(candidate = %candidate.to_string_lossy(), "trying candidate");

    match oracle.attempt(candidate.as_bytes()) {
        Ok(()) => {
            debug!(candidate = %candidate.to_string_lossy(), "candidate accepted");
            if results.send(candidate).is_err() {
                warn!("result stream dropped by the caller; match abandoned");
            }
        }
        Err(rejection) => {
            debug!(candidate = %candidate.to_string_lossy(), %rejection, "candidate rejected");
        }
    }
}
