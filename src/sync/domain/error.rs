//! Error types for synchronization domain validation and lookup.

use super::{IssueNumber, Login};
use thiserror::Error;

/// Errors returned while constructing domain sync values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// The issue number is empty after trimming.
    #[error("issue number must not be empty")]
    EmptyIssueNumber,

    /// An opaque identifier is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// The issue-tracker login is empty after trimming.
    #[error("login must not be empty")]
    EmptyLogin,
}

/// Raised when a login has no entry in the user directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user: {login}")]
pub struct UnknownUserError {
    /// Login that failed to resolve.
    pub login: Login,
}

/// Raised when a comment targets an issue with no corresponding task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task not found for issue #{issue_number}")]
pub struct TaskNotFoundError {
    /// Issue number that has no task.
    pub issue_number: IssueNumber,
}

/// Raised when more than one task carries the same issue number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("more than one task found for issue #{issue_number} ({matches} matches)")]
pub struct AmbiguousTaskError {
    /// Issue number shared by several tasks.
    pub issue_number: IssueNumber,
    /// Number of tasks returned by the search.
    pub matches: usize,
}

/// Errors returned while building a user directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// A mapping entry was invalid.
    #[error(transparent)]
    Domain(#[from] SyncDomainError),

    /// The serialized mapping could not be parsed.
    #[error("invalid user map: {0}")]
    Malformed(String),
}
