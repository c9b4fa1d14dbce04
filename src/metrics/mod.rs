//! Run counters, latency collection, and the final benchmark result.
mod histogram;
mod latency;
mod result;
mod state;
mod types;


pub use histogram::LatencyHistogram;
pub use latency::{
    LATENCY_CHANNEL_CAPACITY, LatencyReport, LatencyStats, latency_channel,
    setup_latency_collector,
};
pub use state::RunState;
pub use types::{BenchmarkResult, LatencySample, RequestOutcome, RunSnapshot};
