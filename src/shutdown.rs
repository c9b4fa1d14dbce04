use tokio::sync::watch;

/// Lifecycle signal broadcast from the run coordinator to every worker.
///
/// Workers start only after `Go` and stop at the first loop check that sees
/// `Stop`. `Stop` is raised once and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSignal {
    Pending,
    Go,
    Stop,
}

pub type SignalSender = watch::Sender<RunSignal>;
pub type SignalReceiver = watch::Receiver<RunSignal>;

#[must_use]
pub fn run_signal() -> (SignalSender, SignalReceiver) {
    watch::channel(RunSignal::Pending)
}

/// Waits for the coordinator's start signal.
///
/// Returns `false` when the run was stopped before it started, or the
/// coordinator went away.
pub async fn wait_for_start(signal_rx: &mut SignalReceiver) -> bool {
    match signal_rx
        .wait_for(|signal| *signal != RunSignal::Pending)
        .await
    {
        Ok(signal) => *signal == RunSignal::Go,
        Err(_closed) => false,
    }
}

/// Non-blocking check, made once per request cycle.
#[must_use]
pub fn stop_requested(signal_rx: &SignalReceiver) -> bool {
    *signal_rx.borrow() == RunSignal::Stop
}
