//! Task spawning.
//!
//! Thin wrappers over `tokio::task` so callers never name Tokio.
//!
//! ```rust
//! use core_async::task;
//!
//! async fn example() {
//!     let handle = task::spawn(async { 42 });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

pub use tokio::task::{spawn_blocking, yield_now, JoinHandle};

/// Spawns a new asynchronous task on the current Tokio runtime.
///
/// The task may run on a different thread than the caller.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}
