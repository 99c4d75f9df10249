//! Main-Context Scheduling
//!
//! UI toolkits only allow state updates from one designated context (the
//! main thread, an event loop, a JS microtask). Results computed on worker
//! threads are handed back through a [`MainScheduler`].

/// Unit of work delivered to the main context
pub type MainTask = Box<dyn FnOnce() + Send + 'static>;

/// Scheduler for the host's UI-affine context
///
/// `schedule` must not block and must eventually run every task it accepts,
/// in submission order. Dropping a task without running it is treated by
/// callers as a delivery failure.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::scheduler::{MainScheduler, MainTask};
///
/// struct GtkScheduler;
///
/// impl MainScheduler for GtkScheduler {
///     fn schedule(&self, task: MainTask) {
///         glib::idle_add_once(task);
///     }
/// }
/// ```
pub trait MainScheduler: Send + Sync {
    fn schedule(&self, task: MainTask);
}

/// Runs tasks immediately on whichever thread schedules them.
///
/// Suitable for headless hosts (CLIs, servers, tests) that have no UI
/// thread; the awaiting task is the main context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl MainScheduler for ImmediateScheduler {
    fn schedule(&self, task: MainTask) {
        task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_immediate_scheduler_runs_inline() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        ImmediateScheduler.schedule(Box::new(move || flag.store(true, Ordering::SeqCst)));

        assert!(ran.load(Ordering::SeqCst));
    }
}
