//! Task aggregate view and mutation payloads exchanged with the task store.

use super::{IssueNumber, PersonId, ProjectId, TaskId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Deduplicated set of people associated with an issue.
///
/// Insertion order is kept so that payloads sent to the store are stable,
/// but equality ignores it.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PersonId>", into = "Vec<PersonId>")]
pub struct Participants(Vec<PersonId>);

impl Participants {
    /// Creates an empty participant set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a participant, returning `true` when it was not already present.
    pub fn insert(&mut self, person: PersonId) -> bool {
        if self.0.contains(&person) {
            return false;
        }
        self.0.push(person);
        true
    }

    /// Adds every present person from `additions`.
    pub fn extend_present(&mut self, additions: impl IntoIterator<Item = Option<PersonId>>) {
        for person in additions.into_iter().flatten() {
            self.insert(person);
        }
    }

    /// Returns `true` when `person` is a participant.
    #[must_use]
    pub fn contains(&self, person: &PersonId) -> bool {
        self.0.contains(person)
    }

    /// Returns the number of participants.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no participants.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates participants in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PersonId> {
        self.0.iter()
    }
}

impl PartialEq for Participants {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Participants {
    fn sorted(&self) -> Vec<&PersonId> {
        let mut people: Vec<&PersonId> = self.0.iter().collect();
        people.sort_unstable();
        people
    }
}

impl From<Vec<PersonId>> for Participants {
    fn from(people: Vec<PersonId>) -> Self {
        people.into_iter().collect()
    }
}

impl From<Participants> for Vec<PersonId> {
    fn from(participants: Participants) -> Self {
        participants.0
    }
}

impl FromIterator<PersonId> for Participants {
    fn from_iter<I: IntoIterator<Item = PersonId>>(iter: I) -> Self {
        let mut participants = Self::new();
        for person in iter {
            participants.insert(person);
        }
        participants
    }
}

impl<'a> IntoIterator for &'a Participants {
    type Item = &'a PersonId;
    type IntoIter = std::slice::Iter<'a, PersonId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Lightweight reference returned by task searches and creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    /// Task identifier.
    pub id: TaskId,
    /// Task title at the time of the call.
    pub title: String,
}

/// Volatile view of a task owned by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Free-form notes, holding the issue URL.
    pub notes: String,
    /// Correlation slot linking the task back to its issue.
    pub issue_number: Option<IssueNumber>,
    /// Participants slot.
    #[serde(default)]
    pub participants: Participants,
    /// Assigned person, if any.
    pub assignee: Option<PersonId>,
    /// Completion flag.
    pub completed: bool,
}

impl Task {
    /// Returns the lightweight reference for this task.
    #[must_use]
    pub fn to_ref(&self) -> TaskRef {
        TaskRef {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Fields for creating a task from an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Workspace that owns the task.
    pub workspace: WorkspaceId,
    /// Project the task is filed under.
    pub project: ProjectId,
    /// Task title, taken from the issue title.
    pub title: String,
    /// Task notes, taken from the issue URL.
    pub notes: String,
    /// Correlation value.
    pub issue_number: IssueNumber,
    /// Initial participants.
    pub participants: Participants,
    /// Initial assignee.
    pub assignee: Option<PersonId>,
}

/// Assignee change carried by a [`TaskUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeUpdate {
    /// Leave the assignee untouched.
    #[default]
    Keep,
    /// Remove the assignee.
    Clear,
    /// Assign the given person.
    Set(PersonId),
}

impl From<Option<PersonId>> for AssigneeUpdate {
    fn from(value: Option<PersonId>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

/// Partial task update; `None` fields are left unchanged by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title.
    pub title: Option<String>,
    /// Assignee change.
    #[serde(default)]
    pub assignee: AssigneeUpdate,
    /// New completion flag.
    pub completed: Option<bool>,
    /// Replacement participant set.
    pub participants: Option<Participants>,
    /// Correlation value to re-assert.
    pub issue_number: Option<IssueNumber>,
}

impl TaskUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the assignee change.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<AssigneeUpdate>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replaces the participant set.
    #[must_use]
    pub fn with_participants(mut self, participants: Participants) -> Self {
        self.participants = Some(participants);
        self
    }

    /// Re-asserts the correlation value.
    #[must_use]
    pub fn with_issue_number(mut self, issue_number: IssueNumber) -> Self {
        self.issue_number = Some(issue_number);
        self
    }

    /// Applies this update to `task` in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        match &self.assignee {
            AssigneeUpdate::Keep => {}
            AssigneeUpdate::Clear => task.assignee = None,
            AssigneeUpdate::Set(person) => task.assignee = Some(person.clone()),
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(participants) = &self.participants {
            task.participants = participants.clone();
        }
        if let Some(issue_number) = &self.issue_number {
            task.issue_number = Some(issue_number.clone());
        }
    }
}
