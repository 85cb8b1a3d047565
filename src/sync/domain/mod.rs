//! Domain model for issue-to-task synchronization.
//!
//! The sync domain models issue and comment events, the task view held by
//! the external store, and the login directory, while keeping all transport
//! concerns outside of the domain boundary.

mod directory;
mod error;
mod event;
mod ids;
mod task;

pub use directory::UserDirectory;
pub use error::{
    AmbiguousTaskError, DirectoryError, SyncDomainError, TaskNotFoundError, UnknownUserError,
};
pub use event::{CommentEvent, IssueEvent, IssueState};
pub use ids::{FieldId, IssueNumber, Login, PersonId, ProjectId, TaskId, WorkspaceId};
pub use task::{AssigneeUpdate, NewTask, Participants, Task, TaskRef, TaskUpdate};
