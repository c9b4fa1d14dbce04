//! Core library for the `barrage` CLI.
//!
//! A fixed pool of workers sends requests to a single HTTP endpoint for a
//! fixed duration while shared counters and a latency collector record what
//! happened. The binary wires CLI arguments and config files into a
//! [`domain::RunConfig`], runs it through [`app::RunCoordinator`], then
//! renders and optionally exports the resulting
//! [`metrics::BenchmarkResult`].
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;

#[cfg(test)]
mod test_support;
