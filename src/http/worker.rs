use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    metrics::{LatencySample, RunState},
    shutdown::{SignalReceiver, stop_requested, wait_for_start},
};

use super::RequestIssuer;

/// Everything one worker needs; each worker owns its own copy.
pub struct WorkerContext {
    pub worker_id: usize,
    pub issuer: RequestIssuer,
    pub state: Arc<RunState>,
    pub samples_tx: mpsc::Sender<LatencySample>,
    pub signal_rx: SignalReceiver,
    pub expected_status_code: u16,
}

/// Spawns one worker task. The handle resolves to the number of requests
/// the worker issued.
#[must_use]
pub fn spawn_worker(context: WorkerContext) -> JoinHandle<u64> {
    tokio::spawn(run_worker(context))
}

async fn run_worker(mut context: WorkerContext) -> u64 {
    if !wait_for_start(&mut context.signal_rx).await {
        debug!("Worker {} stopped before start", context.worker_id);
        return 0;
    }

    let mut issued: u64 = 0;
    while !stop_requested(&context.signal_rx) {
        let outcome = context.issuer.issue().await;
        issued = issued.saturating_add(1);
        context
            .state
            .record(&outcome, context.expected_status_code);
        if context
            .samples_tx
            .send(LatencySample::from(&outcome))
            .await
            .is_err()
        {
            warn!(
                "Worker {}: latency collector is gone, stopping",
                context.worker_id
            );
            break;
        }
    }

    debug!(
        "Worker {} exited after {} requests",
        context.worker_id, issued
    );
    issued
}
