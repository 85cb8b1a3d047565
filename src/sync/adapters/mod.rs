//! Adapter implementations for sync ports.

pub mod memory;
