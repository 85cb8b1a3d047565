//! Task store port for searching, reading, creating, and updating tasks.

use crate::sync::domain::{IssueNumber, NewTask, ProjectId, Task, TaskId, TaskRef, TaskUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task-tracking service contract.
///
/// Implementations back onto whatever task service is integrated. None of
/// the operations are conditional: a read followed by an update may race
/// with another writer, and the last write wins.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task in `project` whose correlation field equals
    /// `issue_number`.
    ///
    /// The search index may lag behind recent creations, so a freshly
    /// created task can be missing from the result. Ordering is not
    /// significant.
    async fn search_tasks(
        &self,
        project: &ProjectId,
        issue_number: &IssueNumber,
    ) -> TaskStoreResult<Vec<TaskRef>>;

    /// Creates a task and returns its reference.
    async fn create_task(&self, task: &NewTask) -> TaskStoreResult<TaskRef>;

    /// Reads the current fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn get_task(&self, id: &TaskId) -> TaskStoreResult<Task>;

    /// Applies a partial update; fields left as `None` are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The access credential was rejected.
    #[error("task store rejected the access credential")]
    Unauthorized,

    /// The store throttled the request.
    #[error("task store rate limit exceeded")]
    RateLimited,

    /// Transport-layer failure.
    #[error("task store transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
