//! Service-level errors for sync operations.

use super::locator::LocateError;
use crate::sync::{
    domain::{AmbiguousTaskError, IssueNumber, TaskNotFoundError, UnknownUserError},
    ports::TaskStoreError,
};
use std::fmt;
use thiserror::Error;

/// Step of a sync operation, reported alongside failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncStep {
    /// Searching for the correlated task.
    Locate,
    /// Mapping a login to a task-store person.
    ResolveUser,
    /// Reading the task's current participants.
    ReadParticipants,
    /// Creating the task.
    Create,
    /// Updating the task.
    Update,
}

impl SyncStep {
    /// Returns a short human-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locate => "locate task",
            Self::ResolveUser => "resolve user",
            Self::ReadParticipants => "read participants",
            Self::Create => "create task",
            Self::Update => "update task",
        }
    }
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cause of a failed sync operation.
#[derive(Debug, Error)]
pub enum SyncErrorKind {
    /// A login has no user directory entry.
    #[error(transparent)]
    UnknownUser(#[from] UnknownUserError),
    /// No task exists and the operation cannot create one.
    #[error(transparent)]
    TaskNotFound(#[from] TaskNotFoundError),
    /// Several tasks share the issue number.
    #[error(transparent)]
    Ambiguous(#[from] AmbiguousTaskError),
    /// The task store call failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

impl From<LocateError> for SyncErrorKind {
    fn from(err: LocateError) -> Self {
        match err {
            LocateError::Ambiguous(inner) => Self::Ambiguous(inner),
            LocateError::Store(inner) => Self::Store(inner),
        }
    }
}

/// Failure of a sync operation, naming the issue and the failing step.
#[derive(Debug, Error)]
#[error("issue #{issue_number}: {step} failed: {kind}")]
pub struct SyncError {
    issue_number: IssueNumber,
    step: SyncStep,
    #[source]
    kind: SyncErrorKind,
}

impl SyncError {
    /// Creates an error for `issue_number` failing at `step`.
    pub fn new(issue_number: IssueNumber, step: SyncStep, kind: impl Into<SyncErrorKind>) -> Self {
        Self {
            issue_number,
            step,
            kind: kind.into(),
        }
    }

    /// Returns the issue the operation was handling.
    #[must_use]
    pub const fn issue_number(&self) -> &IssueNumber {
        &self.issue_number
    }

    /// Returns the step that failed.
    #[must_use]
    pub const fn step(&self) -> SyncStep {
        self.step
    }

    /// Returns the cause.
    #[must_use]
    pub const fn kind(&self) -> &SyncErrorKind {
        &self.kind
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
