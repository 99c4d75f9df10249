//! Main-context scheduling for desktop hosts
//!
//! Desktop apps own their main loop. [`QueuedMainScheduler`] queues delivery
//! tasks; the host drains them from its loop through the paired
//! [`MainQueue`].

use bridge_traits::scheduler::{MainScheduler, MainTask};
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// Queues tasks for the host's main loop.
#[derive(Clone)]
pub struct QueuedMainScheduler {
    tx: mpsc::UnboundedSender<MainTask>,
}

impl QueuedMainScheduler {
    /// Scheduler plus the queue the main loop drains.
    pub fn new() -> (Self, MainQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, MainQueue { rx })
    }
}

impl MainScheduler for QueuedMainScheduler {
    fn schedule(&self, task: MainTask) {
        if self.tx.send(task).is_err() {
            warn!("Main queue closed, dropping task");
        }
    }
}

/// Receiving end, owned by the main loop.
pub struct MainQueue {
    rx: mpsc::UnboundedReceiver<MainTask>,
}

impl MainQueue {
    /// Run every task queued so far. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        if ran > 0 {
            trace!(tasks = ran, "Ran main tasks");
        }
        ran
    }

    /// Wait for the next task and run it. `false` once all schedulers are gone.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}
