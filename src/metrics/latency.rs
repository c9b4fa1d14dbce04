use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use super::{LatencyHistogram, LatencySample};

/// Bound on queued latency samples between workers and the collector.
///
/// Workers wait for room instead of dropping samples, so a slow collector
/// applies backpressure rather than growing memory.
pub const LATENCY_CHANNEL_CAPACITY: usize = 1000;

/// Running latency statistics over successful requests.
///
/// Minimum and maximum stay `None` until the first sample, so an empty run
/// never reports a placeholder as its minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    sum_us: u128,
    count: u64,
    min_us: Option<u64>,
    max_us: Option<u64>,
}

impl LatencyStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum_us: 0,
            count: 0,
            min_us: None,
            max_us: None,
        }
    }

    pub fn record(&mut self, latency_us: u64) {
        self.count = self.count.saturating_add(1);
        self.sum_us = self.sum_us.saturating_add(u128::from(latency_us));
        self.min_us = Some(self.min_us.map_or(latency_us, |min| min.min(latency_us)));
        self.max_us = Some(self.max_us.map_or(latency_us, |max| max.max(latency_us)));
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn min_us(&self) -> Option<u64> {
        self.min_us
    }

    #[must_use]
    pub const fn max_us(&self) -> Option<u64> {
        self.max_us
    }

    /// Mean latency in microseconds, `None` without samples.
    #[must_use]
    pub fn mean_us(&self) -> Option<u64> {
        let mean = self.sum_us.checked_div(u128::from(self.count))?;
        Some(u64::try_from(mean).unwrap_or(u64::MAX))
    }
}

/// Everything the collector learned once its stream closed.
#[derive(Debug)]
pub struct LatencyReport {
    pub stats: LatencyStats,
    pub histogram: Option<LatencyHistogram>,
    pub failed_samples: u64,
}

impl LatencyReport {
    /// p50, p90 and p99 in microseconds.
    #[must_use]
    pub fn percentiles_us(&self) -> (u64, u64, u64) {
        self.histogram
            .as_ref()
            .map_or((0, 0, 0), LatencyHistogram::percentiles)
    }
}

#[must_use]
pub fn latency_channel() -> (mpsc::Sender<LatencySample>, mpsc::Receiver<LatencySample>) {
    mpsc::channel(LATENCY_CHANNEL_CAPACITY)
}

/// Spawns the single consumer of the latency stream.
///
/// The task ends once every sender is dropped and the queue is empty; its
/// handle resolving is the "drained" signal.
#[must_use]
pub fn setup_latency_collector(
    mut samples_rx: mpsc::Receiver<LatencySample>,
) -> JoinHandle<LatencyReport> {
    tokio::spawn(async move {
        let mut stats = LatencyStats::new();
        let mut failed_samples: u64 = 0;
        let mut histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Latency percentiles disabled: {}", err);
                None
            }
        };

        while let Some(sample) = samples_rx.recv().await {
            if !sample.succeeded {
                failed_samples = failed_samples.saturating_add(1);
                continue;
            }
            stats.record(sample.latency_us);
            if let Some(hist) = histogram.as_mut()
                && let Err(err) = hist.record(sample.latency_us)
            {
                warn!("Disabling latency histogram after error: {}", err);
                histogram = None;
            }
        }

        debug!(
            "Latency collector drained {} successful and {} failed samples",
            stats.count(),
            failed_samples
        );
        LatencyReport {
            stats,
            histogram,
            failed_samples,
        }
    })
}
