//! Issue lifecycle transitions observed through the in-memory store.

use std::sync::Arc;

use super::helpers::{engine, login, opened_issue, person, project};
use issue_sync::sync::{
    adapters::memory::{InMemoryTaskStore, StoreCall},
    domain::{CommentEvent, IssueNumber, IssueState, Participants, ProjectId, Task, TaskId},
    services::SyncChange,
};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> Arc<InMemoryTaskStore> {
    Arc::new(InMemoryTaskStore::new())
}

#[rstest]
#[tokio::test]
async fn open_close_reopen_round_trip(store: Arc<InMemoryTaskStore>) {
    let engine = engine(&store);
    let issue = opened_issue(7, "Widget jams on startup");

    engine.create(&issue).await.expect("open should succeed");
    engine
        .close(&issue.clone().with_state(IssueState::Closed))
        .await
        .expect("close should succeed");
    let reopened = engine
        .edit(&issue.clone().with_state(IssueState::Open))
        .await
        .expect("reopen should succeed");

    assert_eq!(reopened.change, SyncChange::Updated);
    assert!(!reopened.self_healed);
    let tasks = store
        .tasks_for_issue(&IssueNumber::from(7))
        .expect("tasks readable");
    let [task] = tasks.as_slice() else {
        panic!("expected a single task");
    };
    assert!(!task.completed);
    assert_eq!(task.notes, "https://github.com/acme/widgets/issues/7");
}

#[rstest]
#[tokio::test]
async fn tasks_carry_project_workspace_and_timestamps(store: Arc<InMemoryTaskStore>) {
    let engine = engine(&store);

    engine
        .create(&opened_issue(8, "Docs typo"))
        .await
        .expect("create should succeed");
    engine
        .close(&opened_issue(8, "Docs typo").with_state(IssueState::Closed))
        .await
        .expect("close should succeed");

    let records = store.records().expect("records readable");
    let [record] = records.as_slice() else {
        panic!("expected a single record");
    };
    assert_eq!(record.project, project());
    assert!(record.workspace.is_some());
    assert!(record.modified_at >= record.created_at);
}

#[rstest]
#[tokio::test]
async fn issue_participants_accumulate_across_events(store: Arc<InMemoryTaskStore>) {
    let engine = engine(&store);
    let issue = opened_issue(9, "Crash on save");

    engine.create(&issue).await.expect("create should succeed");
    engine
        .edit(&issue.clone().with_assignee(login("bob")))
        .await
        .expect("edit should succeed");
    engine
        .add_participant(&CommentEvent::new(IssueNumber::from(9), login("carol")))
        .await
        .expect("comment should succeed");
    engine
        .add_participant(&CommentEvent::new(IssueNumber::from(9), login("BOB")))
        .await
        .expect("repeat comment should succeed");

    let tasks = store
        .tasks_for_issue(&IssueNumber::from(9))
        .expect("tasks readable");
    let [task] = tasks.as_slice() else {
        panic!("expected a single task");
    };
    let expected: Participants = [person("P1"), person("P2"), person("P3")]
        .into_iter()
        .collect();
    assert_eq!(task.participants, expected);
    assert_eq!(task.assignee, Some(person("P2")));
}

#[rstest]
#[tokio::test]
async fn unassigning_clears_assignee_but_keeps_participants(store: Arc<InMemoryTaskStore>) {
    let engine = engine(&store);
    let assigned = opened_issue(10, "Slow query").with_assignee(login("bob"));

    engine.create(&assigned).await.expect("create should succeed");
    engine
        .edit(&opened_issue(10, "Slow query"))
        .await
        .expect("edit should succeed");

    let tasks = store
        .tasks_for_issue(&IssueNumber::from(10))
        .expect("tasks readable");
    let [task] = tasks.as_slice() else {
        panic!("expected a single task");
    };
    assert_eq!(task.assignee, None);
    assert!(task.participants.contains(&person("P2")));
}

#[rstest]
#[tokio::test]
async fn lagging_search_index_never_duplicates_tasks() {
    let store = Arc::new(InMemoryTaskStore::new().with_search_lag(1));
    let engine = engine(&store);
    let issue = opened_issue(11, "Flaky test");

    engine.create(&issue).await.expect("create should succeed");
    engine.create(&issue).await.expect("replay should succeed");

    let creates = store
        .calls()
        .expect("calls readable")
        .iter()
        .filter(|call| matches!(call, StoreCall::Create(_)))
        .count();
    assert_eq!(creates, 1);
}

#[rstest]
#[tokio::test]
async fn tasks_in_other_projects_are_ignored(store: Arc<InMemoryTaskStore>) {
    let other = ProjectId::new("elsewhere").expect("valid project id");
    let foreign = Task {
        id: TaskId::new("T-foreign").expect("valid task id"),
        title: "Same number, other board".to_owned(),
        notes: String::new(),
        issue_number: Some(IssueNumber::from(12)),
        participants: Participants::new(),
        assignee: None,
        completed: false,
    };
    store.seed(other, foreign).expect("seed should succeed");
    let engine = engine(&store);

    let outcome = engine
        .create(&opened_issue(12, "Local issue"))
        .await
        .expect("create should succeed");

    assert_eq!(outcome.change, SyncChange::Created);
    assert_eq!(
        store
            .tasks_for_issue(&IssueNumber::from(12))
            .expect("tasks readable")
            .len(),
        2
    );
}
