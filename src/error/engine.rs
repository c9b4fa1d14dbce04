use thiserror::Error;

use crate::app::RunPhase;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid run phase transition from {from} to {to}.")]
    InvalidTransition { from: RunPhase, to: RunPhase },
    #[error("Worker {worker_id} failed: {source}")]
    WorkerFailed {
        worker_id: usize,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Latency collector failed: {source}")]
    CollectorFailed {
        #[source]
        source: tokio::task::JoinError,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
