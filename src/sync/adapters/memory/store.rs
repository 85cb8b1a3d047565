//! In-memory task store for tests and local runs.
//!
//! The store mimics two properties of hosted task services that the sync
//! engine has to cope with: the search index can lag behind creations, and
//! updates are unconditional (last write wins).

use crate::sync::{
    domain::{IssueNumber, NewTask, ProjectId, Task, TaskId, TaskRef, TaskUpdate, WorkspaceId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One call received by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `search_tasks` call.
    Search {
        /// Project searched.
        project: ProjectId,
        /// Correlation value searched for.
        issue_number: IssueNumber,
    },
    /// `create_task` call.
    Create(NewTask),
    /// `get_task` call.
    Get(TaskId),
    /// `update_task` call.
    Update {
        /// Task updated.
        id: TaskId,
        /// Update payload.
        update: TaskUpdate,
    },
}

impl StoreCall {
    /// Returns `true` for calls that change stored state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Create(_) | Self::Update { .. })
    }
}

/// Stored task together with store-side bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    /// Task fields.
    pub task: Task,
    /// Owning workspace.
    pub workspace: Option<WorkspaceId>,
    /// Project the task is filed under.
    pub project: ProjectId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub modified_at: DateTime<Utc>,
    visible_after: u64,
}

/// Thread-safe in-memory [`TaskStore`].
#[derive(Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<dyn Clock + Send + Sync>,
    search_lag: u64,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: Vec<StoredTask>,
    searches: u64,
    calls: Vec<StoreCall>,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store whose search index is always current.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamping tasks with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock,
            search_lag: 0,
        }
    }

    /// Hides newly created tasks from the next `searches` search calls.
    #[must_use]
    pub const fn with_search_lag(mut self, searches: u64) -> Self {
        self.search_lag = searches;
        self
    }

    /// Inserts an existing task, immediately visible to searches.
    ///
    /// Seeding bypasses the call log and does not check for duplicate
    /// correlation values, so tests can reproduce broken invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the state lock is poisoned.
    pub fn seed(&self, project: ProjectId, task: Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let timestamp = self.clock.utc();
        let visible_after = state.searches;
        state.tasks.push(StoredTask {
            task,
            workspace: None,
            project,
            created_at: timestamp,
            modified_at: timestamp,
            visible_after,
        });
        Ok(())
    }

    /// Returns every call received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the state lock is poisoned.
    pub fn calls(&self) -> TaskStoreResult<Vec<StoreCall>> {
        Ok(self.read()?.calls.clone())
    }

    /// Returns the calls that changed stored state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the state lock is poisoned.
    pub fn mutations(&self) -> TaskStoreResult<Vec<StoreCall>> {
        Ok(self
            .read()?
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect())
    }

    /// Returns every stored task, regardless of index visibility.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the state lock is poisoned.
    pub fn records(&self) -> TaskStoreResult<Vec<StoredTask>> {
        Ok(self.read()?.tasks.clone())
    }

    /// Returns stored tasks correlated with `issue_number`, regardless of
    /// index visibility.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the state lock is poisoned.
    pub fn tasks_for_issue(&self, issue_number: &IssueNumber) -> TaskStoreResult<Vec<Task>> {
        Ok(self
            .read()?
            .tasks
            .iter()
            .filter(|stored| stored.task.issue_number.as_ref() == Some(issue_number))
            .map(|stored| stored.task.clone())
            .collect())
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::transport(std::io::Error::other(err.to_string())))
    }
}

fn find_stored<'a>(state: &'a mut InMemoryStoreState, id: &TaskId) -> Option<&'a mut StoredTask> {
    state.tasks.iter_mut().find(|stored| &stored.task.id == id)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn search_tasks(
        &self,
        project: &ProjectId,
        issue_number: &IssueNumber,
    ) -> TaskStoreResult<Vec<TaskRef>> {
        let mut state = self.write()?;
        state.calls.push(StoreCall::Search {
            project: project.clone(),
            issue_number: issue_number.clone(),
        });
        state.searches += 1;
        let tick = state.searches;
        Ok(state
            .tasks
            .iter()
            .filter(|stored| tick > stored.visible_after)
            .filter(|stored| &stored.project == project)
            .filter(|stored| stored.task.issue_number.as_ref() == Some(issue_number))
            .map(|stored| stored.task.to_ref())
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> TaskStoreResult<TaskRef> {
        let mut state = self.write()?;
        state.calls.push(StoreCall::Create(task.clone()));
        let timestamp = self.clock.utc();
        let created = Task {
            id: TaskId::generate(),
            title: task.title.clone(),
            notes: task.notes.clone(),
            issue_number: Some(task.issue_number.clone()),
            participants: task.participants.clone(),
            assignee: task.assignee.clone(),
            completed: false,
        };
        let task_ref = created.to_ref();
        let visible_after = state.searches + self.search_lag;
        state.tasks.push(StoredTask {
            task: created,
            workspace: Some(task.workspace.clone()),
            project: task.project.clone(),
            created_at: timestamp,
            modified_at: timestamp,
            visible_after,
        });
        Ok(task_ref)
    }

    async fn get_task(&self, id: &TaskId) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        state.calls.push(StoreCall::Get(id.clone()));
        find_stored(&mut state, id)
            .map(|stored| stored.task.clone())
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.calls.push(StoreCall::Update {
            id: id.clone(),
            update: update.clone(),
        });
        let timestamp = self.clock.utc();
        let stored = find_stored(&mut state, id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        update.apply_to(&mut stored.task);
        stored.modified_at = timestamp;
        Ok(())
    }
}
