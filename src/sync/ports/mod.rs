//! Port contracts for issue-to-task synchronization.
//!
//! Ports define transport-agnostic interfaces used by sync services.

pub mod delay;
pub mod store;

pub use delay::{Delay, TokioDelay};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
