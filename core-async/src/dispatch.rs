//! Worker/main dispatch.
//!
//! Network work must never run on the host's UI context, and results must
//! only ever reach the caller through it. [`Dispatcher`] makes that explicit:
//!
//! 1. the future is spawned on the worker runtime,
//! 2. its output is handed to the host's [`MainScheduler`],
//! 3. the scheduled task completes the [`Delivery`] the caller is awaiting.
//!
//! Dropping a [`Delivery`] aborts the worker task, so cancelling the caller's
//! future cancels the in-flight request.
//!
//! ```rust
//! use bridge_traits::ImmediateScheduler;
//! use core_async::dispatch::Dispatcher;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let dispatcher = Dispatcher::current(Arc::new(ImmediateScheduler));
//! let value = dispatcher.dispatch(async { 6 * 7 }).await.unwrap();
//! assert_eq!(value, 42);
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bridge_traits::scheduler::MainScheduler;
use thiserror::Error;
use tracing::trace;

use crate::runtime::Handle;
use crate::sync::oneshot;
use crate::task::JoinHandle;

/// The worker task ended without a result reaching the main context.
///
/// Happens when the worker panics or the main scheduler drops the delivery
/// task instead of running it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("worker task ended without delivering a result")]
pub struct DeliveryError;

/// Runs futures on a worker runtime and delivers their output on the main
/// context.
#[derive(Clone)]
pub struct Dispatcher {
    worker: Handle,
    main: Arc<dyn MainScheduler>,
}

impl Dispatcher {
    pub fn new(worker: Handle, main: Arc<dyn MainScheduler>) -> Self {
        Self { worker, main }
    }

    /// Dispatcher using the runtime of the calling task as worker.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn current(main: Arc<dyn MainScheduler>) -> Self {
        Self::new(Handle::current(), main)
    }

    pub fn worker(&self) -> &Handle {
        &self.worker
    }

    /// Spawn `future` on the worker and return a handle resolving on the
    /// main context.
    pub fn dispatch<F>(&self, future: F) -> Delivery<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let main = Arc::clone(&self.main);

        let worker = self.worker.spawn(async move {
            let output = future.await;
            trace!("worker finished, handing result to main scheduler");
            main.schedule(Box::new(move || {
                // Receiver gone means the caller cancelled.
                let _ = tx.send(output);
            }));
        });

        Delivery { rx, worker }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("worker", &self.worker)
            .field("main", &"MainScheduler { ... }")
            .finish()
    }
}

/// Pending result of a dispatched future.
#[must_use = "dropping a Delivery cancels the dispatched work"]
pub struct Delivery<T> {
    rx: oneshot::Receiver<T>,
    worker: JoinHandle<()>,
}

impl<T> Future for Delivery<T> {
    type Output = Result<T, DeliveryError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map_err(|_| DeliveryError)
    }
}

impl<T> Drop for Delivery<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
