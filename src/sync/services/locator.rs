//! Resolution of issue numbers to existing tasks.

use crate::sync::{
    domain::{AmbiguousTaskError, IssueNumber, ProjectId, TaskId, TaskRef},
    ports::{Delay, TaskStore, TaskStoreError},
};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default wait before the single re-query of the search index.
pub const DEFAULT_COMPENSATING_DELAY: Duration = Duration::from_secs(10);

/// Single-shot wait-and-requery policy for an empty search result.
///
/// The task store's search index can lag behind a task created moments
/// earlier. An empty result is therefore re-queried exactly once after
/// `delay`; there is no further backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompensatingDelay {
    delay: Duration,
}

impl CompensatingDelay {
    /// Creates a policy waiting `delay` before the re-query.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the wait before the re-query.
    #[must_use]
    pub const fn delay(self) -> Duration {
        self.delay
    }
}

impl Default for CompensatingDelay {
    fn default() -> Self {
        Self::new(DEFAULT_COMPENSATING_DELAY)
    }
}

/// Errors returned while locating a task.
#[derive(Debug, Error)]
pub enum LocateError {
    /// More than one task carries the issue number.
    #[error(transparent)]
    Ambiguous(#[from] AmbiguousTaskError),
    /// The search call failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Finds the task correlated with an issue number.
#[derive(Clone)]
pub struct TaskLocator<S, D>
where
    S: TaskStore + ?Sized,
    D: Delay + ?Sized,
{
    store: Arc<S>,
    delay: Arc<D>,
    project: ProjectId,
    policy: CompensatingDelay,
}

impl<S, D> TaskLocator<S, D>
where
    S: TaskStore + ?Sized,
    D: Delay + ?Sized,
{
    /// Creates a locator searching `project`.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        delay: Arc<D>,
        project: ProjectId,
        policy: CompensatingDelay,
    ) -> Self {
        Self {
            store,
            delay,
            project,
            policy,
        }
    }

    /// Returns the task correlated with `issue_number`, or `None` when no
    /// task exists after the compensating re-query.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Ambiguous`] when more than one task matches,
    /// or [`LocateError::Store`] when a search call fails.
    pub async fn locate(&self, issue_number: &IssueNumber) -> Result<Option<TaskId>, LocateError> {
        let first = self.search(issue_number).await?;
        if !first.is_empty() {
            return single(issue_number, first);
        }

        info!(
            issue = %issue_number,
            delay_secs = self.policy.delay().as_secs(),
            "no task found, waiting for search index before re-query"
        );
        self.delay.wait(self.policy.delay()).await;

        let second = self.search(issue_number).await?;
        if second.is_empty() {
            debug!(issue = %issue_number, "no task found after re-query");
            return Ok(None);
        }
        single(issue_number, second)
    }

    async fn search(&self, issue_number: &IssueNumber) -> Result<Vec<TaskRef>, TaskStoreError> {
        let found = self.store.search_tasks(&self.project, issue_number).await?;
        debug!(
            issue = %issue_number,
            project = %self.project,
            matches = found.len(),
            "searched tasks by issue number"
        );
        Ok(found)
    }
}

fn single(issue_number: &IssueNumber, found: Vec<TaskRef>) -> Result<Option<TaskId>, LocateError> {
    let matches = found.len();
    let mut refs = found.into_iter();
    match (refs.next(), refs.next()) {
        (Some(task), None) => Ok(Some(task.id)),
        (None, _) => Ok(None),
        (Some(_), Some(_)) => {
            warn!(issue = %issue_number, matches, "issue number is shared by several tasks");
            Err(AmbiguousTaskError {
                issue_number: issue_number.clone(),
                matches,
            }
            .into())
        }
    }
}
