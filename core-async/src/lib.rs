//! Runtime abstraction layer for the defect-report core.
//!
//! Downstream crates depend on this crate instead of reaching for Tokio
//! directly, so the executor can be swapped per host without touching the
//! request code.
//!
//! # Modules
//!
//! - `task`: Task spawning
//! - `runtime`: Runtime handles and `block_on`
//! - `sync`: Channels used for result handoff
//! - `dispatch`: Run on a worker runtime, deliver through the host's main scheduler

pub mod dispatch;
pub mod runtime;
pub mod sync;
pub mod task;

pub use dispatch::{Delivery, DeliveryError, Dispatcher};
pub use task::spawn;
