//! Unit tests for the sync module.


use crate::sync::{
    domain::{
        IssueNumber, Login, NewTask, PersonId, ProjectId, Task, TaskId, TaskRef, TaskUpdate,
        UserDirectory,
    },
    ports::{Delay, TaskStore, TaskStoreResult},
};
use async_trait::async_trait;
use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

mockall::mock! {
    pub Store {}

    #[async_trait]
    impl TaskStore for Store {
        async fn search_tasks(
            &self,
            project: &ProjectId,
            issue_number: &IssueNumber,
        ) -> TaskStoreResult<Vec<TaskRef>>;
        async fn create_task(&self, task: &NewTask) -> TaskStoreResult<TaskRef>;
        async fn get_task(&self, id: &TaskId) -> TaskStoreResult<Task>;
        async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> TaskStoreResult<()>;
    }
}

/// Delay that returns immediately and records every requested wait.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub(crate) fn waits(&self) -> Vec<Duration> {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

pub(crate) fn issue(value: &str) -> IssueNumber {
    IssueNumber::new(value).expect("valid issue number")
}

pub(crate) fn login(value: &str) -> Login {
    Login::new(value).expect("valid login")
}

pub(crate) fn person(value: &str) -> PersonId {
    PersonId::new(value).expect("valid person id")
}

pub(crate) fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub(crate) fn project() -> ProjectId {
    ProjectId::new("P-board").expect("valid project id")
}

/// Directory mapping alice, bob, and carol to P1, P2, and P3.
pub(crate) fn directory() -> UserDirectory {
    UserDirectory::from_entries([
        (login("alice"), person("P1")),
        (login("bob"), person("P2")),
        (login("carol"), person("P3")),
    ])
}

/// Task correlated with `number`, with the given participants.
pub(crate) fn tracked_task(id: &str, number: &str, participants: &[&str]) -> Task {
    Task {
        id: task_id(id),
        title: format!("Issue {number}"),
        notes: format!("https://tracker.example/issues/{number}"),
        issue_number: Some(issue(number)),
        participants: participants.iter().copied().map(person).collect(),
        assignee: None,
        completed: false,
    }
}
