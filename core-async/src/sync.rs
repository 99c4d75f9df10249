//! Synchronization primitives.
//!
//! Tokio channels: `oneshot` carries a dispatched result back to its
//! `Delivery`, `mpsc` feeds queued main-thread schedulers.

pub use tokio::sync::{mpsc, oneshot};
