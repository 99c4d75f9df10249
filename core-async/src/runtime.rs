//! Runtime utilities that abstract over the underlying async executor.

pub use tokio::runtime::{Builder, Handle};

/// Runs the provided future to completion on a fresh current-thread runtime.
///
/// Must not be called from inside another runtime.
pub fn block_on<F>(future: F) -> std::io::Result<F::Output>
where
    F: std::future::Future,
{
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}

/// Handle of the runtime driving the current task, if any.
pub fn current_handle() -> Option<Handle> {
    Handle::try_current().ok()
}
