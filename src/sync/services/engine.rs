//! Sync engine dispatching issue and comment events to task mutations.
//!
//! Every operation starts by locating the task correlated with the issue,
//! then performs at most one mutating call for the event itself. Close and
//! edit create a missing task first ("self-heal"); adding a participant
//! never does.

use super::{
    error::{SyncError, SyncResult, SyncStep},
    locator::{CompensatingDelay, TaskLocator},
    participants::ParticipantAccumulator,
};
use crate::sync::{
    domain::{
        CommentEvent, IssueEvent, IssueNumber, Login, NewTask, Participants, PersonId, ProjectId,
        TaskId, TaskNotFoundError, TaskUpdate, UserDirectory, WorkspaceId,
    },
    ports::{Delay, TaskStore},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a sync operation did to the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncChange {
    /// A new task was created.
    Created,
    /// An existing task's fields were updated.
    Updated,
    /// A task was marked completed.
    Closed,
    /// A participant was merged into a task.
    ParticipantAdded,
}

/// Result of a successful sync operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Task the operation acted on.
    pub task_id: TaskId,
    /// Kind of change applied.
    pub change: SyncChange,
    /// `true` when the task had to be created before applying the change.
    pub self_healed: bool,
}

impl SyncOutcome {
    const fn new(task_id: TaskId, change: SyncChange) -> Self {
        Self {
            task_id,
            change,
            self_healed: false,
        }
    }

    const fn healed(mut self, self_healed: bool) -> Self {
        self.self_healed = self_healed;
        self
    }
}

/// Static settings the engine needs at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Workspace new tasks are created in.
    pub workspace: WorkspaceId,
    /// Project searched and new tasks are filed under.
    pub project: ProjectId,
    /// Login to person mapping.
    pub directory: UserDirectory,
    /// Re-query policy for the task locator.
    pub policy: CompensatingDelay,
}

/// Issue-to-task synchronization engine.
pub struct SyncEngine<S, D>
where
    S: TaskStore + ?Sized,
    D: Delay + ?Sized,
{
    store: Arc<S>,
    locator: TaskLocator<S, D>,
    participants: ParticipantAccumulator<S>,
    directory: UserDirectory,
    workspace: WorkspaceId,
    project: ProjectId,
}

impl<S, D> SyncEngine<S, D>
where
    S: TaskStore + ?Sized,
    D: Delay + ?Sized,
{
    /// Creates an engine backed by `store`, waiting through `delay`.
    #[must_use]
    pub fn new(store: Arc<S>, delay: Arc<D>, settings: EngineSettings) -> Self {
        let EngineSettings {
            workspace,
            project,
            directory,
            policy,
        } = settings;
        Self {
            locator: TaskLocator::new(Arc::clone(&store), delay, project.clone(), policy),
            participants: ParticipantAccumulator::new(Arc::clone(&store)),
            store,
            directory,
            workspace,
            project,
        }
    }

    /// Creates a task for an opened issue.
    ///
    /// An issue that already has a task is treated as an edit, so replayed
    /// or out-of-order deliveries never produce a second task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when locating, user resolution, or the store
    /// call fails.
    #[tracing::instrument(skip_all, fields(issue = %event.issue_number))]
    pub async fn create(&self, event: &IssueEvent) -> SyncResult<SyncOutcome> {
        debug!(?event, "received issue event");
        match self.locate(&event.issue_number).await? {
            Some(task_id) => {
                info!(task = %task_id, "issue already tracked, applying as edit");
                self.apply_edit(&task_id, event).await
            }
            None => {
                let task_id = self.create_untracked(event).await?;
                Ok(SyncOutcome::new(task_id, SyncChange::Created))
            }
        }
    }

    /// Marks the issue's task completed, creating it first when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when locating, self-heal creation, or the
    /// update fails.
    #[tracing::instrument(skip_all, fields(issue = %event.issue_number))]
    pub async fn close(&self, event: &IssueEvent) -> SyncResult<SyncOutcome> {
        debug!(?event, "received issue event");
        let (task_id, self_healed) = self.locate_or_create(event).await?;
        let update = TaskUpdate::new().with_completed(true);
        self.update(&event.issue_number, &task_id, &update).await?;
        info!(task = %task_id, self_healed, "task marked completed");
        Ok(SyncOutcome::new(task_id, SyncChange::Closed).healed(self_healed))
    }

    /// Mirrors the issue's title, assignee, and state onto its task,
    /// creating the task first when missing.
    ///
    /// `completed` always follows the current issue state, so reopening an
    /// issue reopens its task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when locating, self-heal creation, user
    /// resolution, reading participants, or the update fails.
    #[tracing::instrument(skip_all, fields(issue = %event.issue_number))]
    pub async fn edit(&self, event: &IssueEvent) -> SyncResult<SyncOutcome> {
        debug!(?event, "received issue event");
        let (task_id, self_healed) = self.locate_or_create(event).await?;
        let outcome = self.apply_edit(&task_id, event).await?;
        Ok(outcome.healed(self_healed))
    }

    /// Adds the commenter to the task's participants.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] with [`super::SyncErrorKind::TaskNotFound`] when the
    /// issue has no task, or when user resolution, reading participants, or
    /// the update fails.
    #[tracing::instrument(skip_all, fields(issue = %event.issue_number))]
    pub async fn add_participant(&self, event: &CommentEvent) -> SyncResult<SyncOutcome> {
        debug!(?event, "received comment event");
        let issue_number = &event.issue_number;
        let Some(task_id) = self.locate(issue_number).await? else {
            warn!("comment on an issue without a task");
            return Err(SyncError::new(
                issue_number.clone(),
                SyncStep::Locate,
                TaskNotFoundError {
                    issue_number: issue_number.clone(),
                },
            ));
        };

        let commenter = self.resolve(issue_number, Some(&event.commenter))?;
        let participants = self.union(issue_number, &task_id, commenter).await?;
        let update = TaskUpdate::new()
            .with_participants(participants)
            .with_issue_number(issue_number.clone());
        self.update(issue_number, &task_id, &update).await?;
        info!(task = %task_id, commenter = %event.commenter, "participant added");
        Ok(SyncOutcome::new(task_id, SyncChange::ParticipantAdded))
    }

    async fn apply_edit(&self, task_id: &TaskId, event: &IssueEvent) -> SyncResult<SyncOutcome> {
        let issue_number = &event.issue_number;
        let assignee = self.resolve(issue_number, event.assignee.as_ref())?;
        let completed = event.state.is_closed();
        let participants = self.union(issue_number, task_id, assignee.clone()).await?;
        let update = TaskUpdate::new()
            .with_title(event.title.clone())
            .with_assignee(assignee)
            .with_completed(completed)
            .with_participants(participants)
            .with_issue_number(issue_number.clone());
        self.update(issue_number, task_id, &update).await?;
        info!(task = %task_id, completed, "task updated from issue");
        Ok(SyncOutcome::new(task_id.clone(), SyncChange::Updated))
    }

    /// Finds the task for `event`, creating it when the search comes back
    /// empty. Returns the task id and whether it was created.
    async fn locate_or_create(&self, event: &IssueEvent) -> SyncResult<(TaskId, bool)> {
        let issue_number = &event.issue_number;
        if let Some(task_id) = self.locate(issue_number).await? {
            return Ok((task_id, false));
        }

        info!("issue not tracked yet, creating task before applying event");
        let created = self.create_untracked(event).await?;
        // Re-query so a duplicate created concurrently surfaces as ambiguity;
        // a lagging index falls back to the id the store just returned.
        let task_id = self.locate(issue_number).await?.unwrap_or(created);
        Ok((task_id, true))
    }

    async fn create_untracked(&self, event: &IssueEvent) -> SyncResult<TaskId> {
        let issue_number = &event.issue_number;
        let assignee = self.resolve(issue_number, event.assignee.as_ref())?;
        let author = self.resolve(issue_number, event.author.as_ref())?;
        let mut participants = Participants::new();
        participants.extend_present([author, assignee.clone()]);

        let new_task = NewTask {
            workspace: self.workspace.clone(),
            project: self.project.clone(),
            title: event.title.clone(),
            notes: event.url.clone(),
            issue_number: issue_number.clone(),
            participants,
            assignee,
        };
        let created = self
            .store
            .create_task(&new_task)
            .await
            .map_err(|err| SyncError::new(issue_number.clone(), SyncStep::Create, err))?;
        info!(task = %created.id, "task created");
        Ok(created.id)
    }

    async fn locate(&self, issue_number: &IssueNumber) -> SyncResult<Option<TaskId>> {
        self.locator
            .locate(issue_number)
            .await
            .map_err(|err| SyncError::new(issue_number.clone(), SyncStep::Locate, err))
    }

    fn resolve(
        &self,
        issue_number: &IssueNumber,
        login: Option<&Login>,
    ) -> SyncResult<Option<PersonId>> {
        self.directory.resolve(login).map_err(|err| {
            warn!(login = %err.login, "login missing from user directory");
            SyncError::new(issue_number.clone(), SyncStep::ResolveUser, err)
        })
    }

    async fn union(
        &self,
        issue_number: &IssueNumber,
        task_id: &TaskId,
        addition: Option<PersonId>,
    ) -> SyncResult<Participants> {
        self.participants
            .union(task_id, [addition])
            .await
            .map_err(|err| SyncError::new(issue_number.clone(), SyncStep::ReadParticipants, err))
    }

    async fn update(
        &self,
        issue_number: &IssueNumber,
        task_id: &TaskId,
        update: &TaskUpdate,
    ) -> SyncResult<()> {
        self.store
            .update_task(task_id, update)
            .await
            .map_err(|err| SyncError::new(issue_number.clone(), SyncStep::Update, err))
    }
}
