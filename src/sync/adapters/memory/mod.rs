//! In-memory adapter implementations for the sync ports.

mod store;

pub use store::{InMemoryTaskStore, StoreCall, StoredTask};
