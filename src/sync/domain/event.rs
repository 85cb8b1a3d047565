//! Issue-tracker event snapshots consumed by the sync engine.

use super::{IssueNumber, Login};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// The issue is open.
    #[default]
    Open,
    /// The issue has been closed.
    Closed,
}

impl IssueState {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Returns `true` when the issue is closed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable snapshot of one issue event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    /// Stable issue number.
    #[serde(alias = "number")]
    pub issue_number: IssueNumber,
    /// Browser URL of the issue.
    #[serde(alias = "html_url")]
    pub url: String,
    /// Issue title.
    pub title: String,
    /// Issue author, when known.
    #[serde(default)]
    pub author: Option<Login>,
    /// Current assignee, when any.
    #[serde(default)]
    pub assignee: Option<Login>,
    /// Current issue state.
    #[serde(default)]
    pub state: IssueState,
}

impl IssueEvent {
    /// Creates an open issue event without author or assignee.
    #[must_use]
    pub fn new(
        issue_number: IssueNumber,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            issue_number,
            url: url.into(),
            title: title.into(),
            author: None,
            assignee: None,
            state: IssueState::Open,
        }
    }

    /// Sets the issue author.
    #[must_use]
    pub fn with_author(mut self, author: Login) -> Self {
        self.author = Some(author);
        self
    }

    /// Sets the issue assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Login) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the issue state.
    #[must_use]
    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }
}

/// Immutable snapshot of one comment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEvent {
    /// Issue the comment was posted on.
    #[serde(alias = "number")]
    pub issue_number: IssueNumber,
    /// Comment author.
    pub commenter: Login,
}

impl CommentEvent {
    /// Creates a comment event.
    #[must_use]
    pub const fn new(issue_number: IssueNumber, commenter: Login) -> Self {
        Self {
            issue_number,
            commenter,
        }
    }
}
