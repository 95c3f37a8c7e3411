//! src/search/feeder.rs
//! Candidate feeder: sequential wordlist reader + admission loop

use std::io::{self, BufRead};

use crossbeam_channel::Sender;
use rayon::ThreadPool;
use tracing::{debug, warn};

use crate::aliases::SecretBytes;
use crate::cancel::CancelToken;
use crate::candidate::Candidate;
use crate::oracle::Oracle;
use crate::search::slots::SlotPool;
use crate::search::worker::test_candidate;
use crate::search::{FeedReport, StopReason};

/// Splits a byte stream into newline-separated records.
///
/// - records are split on `\n`; one trailing `\r` is removed
/// - a last record without a terminating newline is still a record
/// - a trailing newline does not produce an extra empty record
/// - empty lines in the middle of the stream are (empty) records
///
/// The returned slice borrows an internal buffer that is reused by the next
/// call; copy it out (see [`Candidate::copy_from`]) before reading again.
pub struct CandidateFeeder<R> {
    reader: R,
    line: SecretBytes,
}

impl<R: BufRead> CandidateFeeder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: SecretBytes::new(Vec::with_capacity(64)),
        }
    }

    /// Read the next record, or `None` at end of stream.
    pub fn next_record(&mut self) -> io::Result<Option<&[u8]>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }

        let mut end = self.line.len();
        if self.line[..end].ends_with(b"\n") {
            end -= 1;
        }
        if self.line[..end].ends_with(b"\r") {
            end -= 1;
        }
        Ok(Some(&self.line[..end]))
    }
}

/// Admit every record of `feeder` into the search, in order.
///
/// For each record: wait for a free slot, check `cancel`, then hand an owned
/// [`Candidate`] together with the slot to a unit of work on `workers`.
/// Returns only after every spawned unit of work has finished.
pub(crate) fn admit_all<R, O>(
    mut feeder: CandidateFeeder<R>,
    workers: &ThreadPool,
    slots: &SlotPool,
    oracle: &O,
    cancel: &CancelToken,
    results: &Sender<Candidate>,
) -> io::Result<FeedReport>
where
    R: BufRead,
    O: Oracle + ?Sized,
{
    let mut read = 0u64;
    let mut admitted = 0u64;

    debug!(concurrency = slots.capacity(), "feeder started");

    let stop = workers.in_place_scope_fifo(|scope| loop {
        if cancel.is_cancelled() {
            break Ok(StopReason::Cancelled);
        }

        let record = match feeder.next_record() {
            Ok(Some(record)) => record,
            Ok(None) => break Ok(StopReason::Exhausted),
            Err(e) => {
                warn!(error = %e, read, "candidate stream read failed; no further candidates admitted");
                break Err(e);
            }
        };
        read += 1;

        let slot = slots.acquire();
        if cancel.is_cancelled() {
            break Ok(StopReason::Cancelled);
        }

        let candidate = Candidate::copy_from(record);
        admitted += 1;
        scope.spawn_fifo(move |_| test_candidate(candidate, slot, oracle, cancel, results));
    });

    debug!(read, admitted, ?stop, "feeder stopped; all units of work finished");

    stop.map(|stop| FeedReport {
        read,
        admitted,
        stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records(input: &[u8]) -> Vec<Vec<u8>> {
        let mut feeder = CandidateFeeder::new(Cursor::new(input.to_vec()));
        let mut out = Vec::new();
        while let Some(record) = feeder.next_record().unwrap() {
            out.push(record.to_vec());
        }
        out
    }

    #[test]
    fn empty_stream_has_no_records() {
        assert!(records(b"").is_empty());
    }

    #[test]
    fn trailing_newline_adds_no_record() {
        assert_eq!(records(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn last_record_without_newline_is_kept() {
        assert_eq!(records(b"a\nb"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn crlf_and_empty_lines() {
        assert_eq!(
            records(b"one\r\n\r\ntwo\n\nthree"),
            vec![
                b"one".to_vec(),
                Vec::new(),
                b"two".to_vec(),
                Vec::new(),
                b"three".to_vec()
            ]
        );
    }

    #[test]
    fn only_one_carriage_return_is_stripped() {
        assert_eq!(records(b"x\r\r\n"), vec![b"x\r".to_vec()]);
    }

    #[test]
    fn non_utf8_bytes_pass_through() {
        assert_eq!(records(b"\xff\xfe\n"), vec![vec![0xff, 0xfe]]);
    }
}
