use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    domain::RunConfig,
    error::{AppResult, EngineError},
    http::{RequestIssuer, WorkerContext, build_client, spawn_worker},
    metrics::{BenchmarkResult, RunState, latency_channel, setup_latency_collector},
    shutdown::{RunSignal, run_signal},
};

/// Lifecycle of a single run. Phases only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Configuring,
    Running,
    Draining,
    Completed,
}

impl RunPhase {
    /// The only phase reachable from `self`, `None` once completed.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Configuring => Some(Self::Running),
            Self::Running => Some(Self::Draining),
            Self::Draining => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Moves to `to` if it directly follows `self`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidTransition` for skips, repeats and
    /// anything after `Completed`.
    pub fn advance(self, to: Self) -> Result<Self, EngineError> {
        if self.next() == Some(to) {
            Ok(to)
        } else {
            Err(EngineError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuring => "configuring",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Owns one run from worker spawn to the assembled result.
#[derive(Debug)]
pub struct RunCoordinator {
    config: Arc<RunConfig>,
    phase: RunPhase,
}

impl RunCoordinator {
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: Arc::new(config),
            phase: RunPhase::Configuring,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    fn transition(&mut self, to: RunPhase) -> Result<(), EngineError> {
        self.phase = self.phase.advance(to)?;
        debug!("Run phase: {}", self.phase);
        Ok(())
    }

    /// Drives the run through every phase and returns the final result.
    ///
    /// Workers wait on a start gate, so a zero duration stops them before
    /// any request is issued.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built, or when a
    /// worker or the latency collector task fails to join.
    pub async fn run(mut self) -> AppResult<BenchmarkResult> {
        let client = build_client(&self.config)?;
        let state = Arc::new(RunState::new());
        let (signal_tx, signal_rx) = run_signal();
        let (samples_tx, samples_rx) = latency_channel();
        let collector = setup_latency_collector(samples_rx);

        let workers: Vec<JoinHandle<u64>> = (0..self.config.connections)
            .map(|worker_id| {
                spawn_worker(WorkerContext {
                    worker_id,
                    issuer: RequestIssuer::new(client.clone(), Arc::clone(&self.config)),
                    state: Arc::clone(&state),
                    samples_tx: samples_tx.clone(),
                    signal_rx: signal_rx.clone(),
                    expected_status_code: self.config.expected_status_code,
                })
            })
            .collect();
        drop(signal_rx);
        debug!("Spawned {} workers", workers.len());

        self.transition(RunPhase::Running)?;
        let started = Instant::now();
        if self.config.duration.is_zero() {
            signal_tx.send_replace(RunSignal::Stop);
        } else {
            signal_tx.send_replace(RunSignal::Go);
            tokio::time::sleep(self.config.duration).await;
            signal_tx.send_replace(RunSignal::Stop);
        }

        self.transition(RunPhase::Draining)?;
        let mut issued: u64 = 0;
        for (worker_id, handle) in workers.into_iter().enumerate() {
            let worker_issued = handle
                .await
                .map_err(|source| EngineError::WorkerFailed { worker_id, source })?;
            issued = issued.saturating_add(worker_issued);
        }
        drop(samples_tx);
        let latency = collector
            .await
            .map_err(|source| EngineError::CollectorFailed { source })?;
        debug!(
            "Drained {} requests in {:?}",
            issued,
            started.elapsed()
        );

        self.transition(RunPhase::Completed)?;
        let result = BenchmarkResult::assemble(
            &self.config,
            state.snapshot(),
            &latency,
            Utc::now(),
        );
        info!(
            "Run completed: {} requests, {} failed",
            result.total_requests, result.failed_requests
        );
        Ok(result)
    }
}
