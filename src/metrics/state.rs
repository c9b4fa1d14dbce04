use std::collections::BTreeMap;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use super::{RequestOutcome, RunSnapshot};

/// Counters shared by every worker for the lifetime of one run.
///
/// Scalars are lock-free atomics. The status-code histogram is a map and
/// sits behind its own mutex, which guards nothing else.
#[derive(Debug, Default)]
pub struct RunState {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    timeouts: AtomicU64,
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
    unexpected_status: AtomicU64,
    status_codes: Mutex<BTreeMap<u16, u64>>,
}

impl RunState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every counter for one finished request.
    pub fn record(&self, outcome: &RequestOutcome, expected_status_code: u16) {
        match outcome.status_code {
            Some(status_code) => {
                self.successful_requests.fetch_add(1, Ordering::Relaxed);
                if status_code != expected_status_code {
                    self.unexpected_status.fetch_add(1, Ordering::Relaxed);
                }
                self.record_status(status_code);
            }
            None => {
                self.failed_requests.fetch_add(1, Ordering::Relaxed);
                if outcome.timed_out {
                    self.timeouts.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
        self.bytes_read
            .fetch_add(outcome.bytes_read, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(outcome.bytes_written, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn record_status(&self, status_code: u16) {
        let mut status_codes = self
            .status_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = status_codes.entry(status_code).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    /// Copies the counters out. Only meaningful once all workers have exited.
    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        let status_codes = self
            .status_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        RunSnapshot {
            total_requests: self.total_requests.load(Ordering::Acquire),
            successful_requests: self.successful_requests.load(Ordering::Acquire),
            failed_requests: self.failed_requests.load(Ordering::Acquire),
            timeouts: self.timeouts.load(Ordering::Acquire),
            bytes_read: self.bytes_read.load(Ordering::Acquire),
            bytes_written: self.bytes_written.load(Ordering::Acquire),
            unexpected_status: self.unexpected_status.load(Ordering::Acquire),
            status_codes,
        }
    }
}
