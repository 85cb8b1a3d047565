//! Application services for issue-to-task synchronization.

mod engine;
mod error;
mod locator;
mod participants;

pub use engine::{EngineSettings, SyncChange, SyncEngine, SyncOutcome};
pub use error::{SyncError, SyncErrorKind, SyncResult, SyncStep};
pub use locator::{CompensatingDelay, DEFAULT_COMPENSATING_DELAY, LocateError, TaskLocator};
pub use participants::ParticipantAccumulator;
