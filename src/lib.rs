//! issue-sync: keeps task-store tasks in step with issue-tracker issues.
//!
//! When an issue is opened, edited, closed, or commented on, the matching
//! task is created, updated, completed, or given a new participant.
//!
//! # Architecture
//!
//! issue-sync follows hexagonal architecture principles:
//!
//! - **Domain**: Events, task views, and the login directory
//! - **Ports**: Abstract trait interfaces for the task store and timers
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`sync`]: The synchronization engine
//! - [`config`]: Inputs supplied by the invoking platform
//! - [`action`]: Action selection, dispatch, and exit codes

pub mod action;
pub mod config;
pub mod sync;
