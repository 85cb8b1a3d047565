//! Participant accumulation over a task's lifetime.

use crate::sync::{
    domain::{Participants, PersonId, TaskId},
    ports::{TaskStore, TaskStoreResult},
};
use std::sync::Arc;

/// Merges new people into a task's participants without writing back.
///
/// The read here and the caller's later update are not atomic against the
/// store: two concurrent events for one task can lose a participant.
#[derive(Clone)]
pub struct ParticipantAccumulator<S>
where
    S: TaskStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> ParticipantAccumulator<S>
where
    S: TaskStore + ?Sized,
{
    /// Creates an accumulator reading from `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the task's current participants plus every present addition.
    ///
    /// # Errors
    ///
    /// Returns the store error when the task cannot be read.
    pub async fn union(
        &self,
        task_id: &TaskId,
        additions: impl IntoIterator<Item = Option<PersonId>> + Send,
    ) -> TaskStoreResult<Participants> {
        let task = self.store.get_task(task_id).await?;
        let mut participants = task.participants;
        participants.extend_present(additions);
        Ok(participants)
    }
}
