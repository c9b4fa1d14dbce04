use chrono::{DateTime, Utc};

use crate::domain::RunConfig;

use super::{BenchmarkResult, LatencyReport, RunSnapshot};

impl BenchmarkResult {
    /// Merges the frozen counters and latency report into the final result.
    ///
    /// Every derived metric is zero when its denominator is zero: requests
    /// per second without a duration, error rate without requests, and the
    /// latency figures without a successful request.
    #[must_use]
    pub fn assemble(
        config: &RunConfig,
        snapshot: RunSnapshot,
        latency: &LatencyReport,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let duration_secs = config.duration_secs();
        let (p50_us, p90_us, p99_us) = latency.percentiles_us();
        let stats = &latency.stats;

        Self {
            connections: config.connections,
            duration_secs,
            total_requests: snapshot.total_requests,
            successful_requests: snapshot.successful_requests,
            failed_requests: snapshot.failed_requests,
            timeouts: snapshot.timeouts,
            requests_per_second: ratio(snapshot.total_requests, duration_secs),
            average_latency_ms: micros_to_ms(stats.mean_us().unwrap_or(0)),
            min_latency_ms: micros_to_ms(stats.min_us().unwrap_or(0)),
            max_latency_ms: micros_to_ms(stats.max_us().unwrap_or(0)),
            p50_latency_ms: micros_to_ms(p50_us),
            p90_latency_ms: micros_to_ms(p90_us),
            p99_latency_ms: micros_to_ms(p99_us),
            bytes_read: snapshot.bytes_read,
            bytes_written: snapshot.bytes_written,
            error_rate: percentage(snapshot.failed_requests, snapshot.total_requests),
            unexpected_status: snapshot.unexpected_status,
            status_codes: snapshot.status_codes,
            timestamp,
        }
    }

    /// Share of all requests represented by `count`, in percent.
    #[must_use]
    pub fn status_share(&self, count: u64) -> f64 {
        percentage(count, self.total_requests)
    }
}

/// Derived rates are computed in millionths with integer arithmetic and
/// only turned into `f64` at the end.
const FIXED_SCALE: u64 = 1_000_000;
const PERCENT: u64 = 100;
const MICROS_PER_MS: u64 = 1_000;

/// `numerator / denominator` in millionths, 0 for a zero denominator.
fn ratio_millionths(numerator: u64, denominator: u64) -> u64 {
    let scaled = u128::from(numerator)
        .saturating_mul(u128::from(FIXED_SCALE))
        .checked_div(u128::from(denominator))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    fixed_to_f64(ratio_millionths(numerator, denominator), FIXED_SCALE)
}

fn percentage(part: u64, whole: u64) -> f64 {
    fixed_to_f64(
        ratio_millionths(part.saturating_mul(PERCENT), whole),
        FIXED_SCALE,
    )
}

fn micros_to_ms(micros: u64) -> f64 {
    fixed_to_f64(micros, MICROS_PER_MS)
}

#[expect(
    clippy::float_arithmetic,
    reason = "reported metrics are fractional; this is the single integer to float step"
)]
fn fixed_to_f64(value: u64, divisor: u64) -> f64 {
    value as f64 / divisor as f64
}
