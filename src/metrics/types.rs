use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a single request/response cycle.
///
/// `status_code` is only present when the HTTP exchange completed, which is
/// also what makes the outcome a success. A 500 response is still a success
/// here: it is a completed exchange, not a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub latency: Duration,
    pub status_code: Option<u16>,
    pub timed_out: bool,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl RequestOutcome {
    #[must_use]
    pub const fn success(
        latency: Duration,
        status_code: u16,
        bytes_read: u64,
        bytes_written: u64,
    ) -> Self {
        Self {
            latency,
            status_code: Some(status_code),
            timed_out: false,
            bytes_read,
            bytes_written,
        }
    }

    #[must_use]
    pub const fn failure(latency: Duration, timed_out: bool) -> Self {
        Self {
            latency,
            status_code: None,
            timed_out,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.status_code.is_some()
    }
}

/// One latency observation published by a worker to the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySample {
    pub latency_us: u64,
    pub succeeded: bool,
}

impl From<&RequestOutcome> for LatencySample {
    fn from(outcome: &RequestOutcome) -> Self {
        Self {
            latency_us: u64::try_from(outcome.latency.as_micros()).unwrap_or(u64::MAX),
            succeeded: outcome.succeeded(),
        }
    }
}

/// Frozen copy of the shared run counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub timeouts: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub unexpected_status: u64,
    pub status_codes: BTreeMap<u16, u64>,
}

/// Immutable result of a completed run, handed to rendering and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub connections: usize,
    #[serde(rename = "durationSeconds")]
    pub duration_secs: u64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub timeouts: u64,
    pub requests_per_second: f64,
    pub average_latency_ms: f64,
    pub min_latency_ms: f64,
    pub max_latency_ms: f64,
    pub p50_latency_ms: f64,
    pub p90_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub error_rate: f64,
    pub unexpected_status: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub timestamp: DateTime<Utc>,
}
