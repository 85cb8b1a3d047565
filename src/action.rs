//! Action selector and process boundary.
//!
//! The invoking platform names an action and supplies the event it applies
//! to. This module pairs the two, hands them to the [`SyncEngine`], and maps
//! the result to a process exit code.

use crate::{
    config::ConfigError,
    sync::{
        domain::{CommentEvent, IssueEvent},
        ports::{Delay, TaskStore},
        services::{SyncEngine, SyncError, SyncOutcome},
    },
};
use std::{fmt, process::ExitCode, str::FromStr};
use thiserror::Error;
use tracing::{error, info};

/// Operation requested by the invoking platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a task for an opened issue.
    Create,
    /// Complete the task of a closed issue.
    Close,
    /// Mirror an issue edit onto its task.
    Edit,
    /// Add a commenter to the task's participants.
    AddParticipant,
}

impl Action {
    /// Returns the canonical selector string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Close => "close",
            Self::Edit => "edit",
            Self::AddParticipant => "add-participant",
        }
    }

    /// Returns `true` when the action consumes a comment event.
    #[must_use]
    pub const fn expects_comment(self) -> bool {
        matches!(self, Self::AddParticipant)
    }
}

impl FromStr for Action {
    type Err = InvalidActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "create" | "open" => Ok(Self::Create),
            "close" => Ok(Self::Close),
            "edit" => Ok(Self::Edit),
            "add-participant" | "add_participant" => Ok(Self::AddParticipant),
            _ => Err(InvalidActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised for an unrecognized action selector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid action: {0}")]
pub struct InvalidActionError(pub String);

/// Event handed over by the ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Issue opened, edited, or closed.
    Issue(IssueEvent),
    /// Comment posted on an issue.
    Comment(CommentEvent),
}

impl SyncEvent {
    /// Deserializes the event shape `action` consumes from an
    /// already-extracted JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Event`] when the JSON does not match the shape.
    pub fn from_json(action: Action, raw: &str) -> Result<Self, RunError> {
        let parsed = if action.expects_comment() {
            serde_json::from_str(raw).map(Self::Comment)
        } else {
            serde_json::from_str(raw).map(Self::Issue)
        };
        parsed.map_err(|err| RunError::Event(err.to_string()))
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Issue(_) => "issue",
            Self::Comment(_) => "comment",
        }
    }
}

/// Errors surfaced to the invoking platform.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The action selector is unknown.
    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),

    /// The event could not be decoded.
    #[error("invalid event: {0}")]
    Event(String),

    /// The event kind does not fit the action.
    #[error("action '{action}' cannot handle a {found} event")]
    EventMismatch {
        /// Requested action.
        action: Action,
        /// Kind of event received.
        found: &'static str,
    },

    /// The sync operation failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl RunError {
    /// Returns the exit code reported for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

/// Runs `action` for `event` on `engine`.
///
/// # Errors
///
/// Returns [`RunError::EventMismatch`] when the event kind does not fit the
/// action, or [`RunError::Sync`] when the operation fails.
pub async fn run<S, D>(
    engine: &SyncEngine<S, D>,
    action: Action,
    event: &SyncEvent,
) -> Result<SyncOutcome, RunError>
where
    S: TaskStore + ?Sized,
    D: Delay + ?Sized,
{
    let outcome = match (action, event) {
        (Action::Create, SyncEvent::Issue(issue)) => engine.create(issue).await?,
        (Action::Close, SyncEvent::Issue(issue)) => engine.close(issue).await?,
        (Action::Edit, SyncEvent::Issue(issue)) => engine.edit(issue).await?,
        (Action::AddParticipant, SyncEvent::Comment(comment)) => {
            engine.add_participant(comment).await?
        }
        (_, other) => {
            return Err(RunError::EventMismatch {
                action,
                found: other.kind(),
            });
        }
    };
    Ok(outcome)
}

/// Logs the result of a run and converts it to a process exit code.
///
/// Failures are logged with their full message, which names the issue and
/// the failing step.
#[must_use]
pub fn report(result: &Result<SyncOutcome, RunError>) -> ExitCode {
    match result {
        Ok(outcome) => {
            info!(
                task = %outcome.task_id,
                change = ?outcome.change,
                self_healed = outcome.self_healed,
                "sync finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "sync failed");
            err.exit_code()
        }
    }
}
