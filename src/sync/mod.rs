//! Issue-to-task synchronization.
//!
//! Keeps one task per tracked issue: creating it when the issue opens,
//! mirroring edits and closure onto it, and accumulating the people who
//! author, are assigned to, or comment on the issue. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
