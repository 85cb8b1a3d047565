//! Shared fixtures for in-memory sync integration tests.

use std::{sync::Arc, time::Duration};

use issue_sync::sync::{
    adapters::memory::InMemoryTaskStore,
    domain::{IssueEvent, IssueNumber, Login, PersonId, ProjectId, UserDirectory, WorkspaceId},
    ports::TokioDelay,
    services::{CompensatingDelay, EngineSettings, SyncEngine},
};

/// Engine type used by the in-memory tests.
pub type TestEngine = SyncEngine<InMemoryTaskStore, TokioDelay>;

/// Project all tests file tasks under.
pub fn project() -> ProjectId {
    ProjectId::new("1209000000000001").expect("valid project id")
}

/// Directory mapping alice, bob, and carol to P1, P2, and P3.
pub fn directory() -> UserDirectory {
    UserDirectory::from_entries([
        (login("alice"), person("P1")),
        (login("bob"), person("P2")),
        (login("carol"), person("P3")),
    ])
}

/// Builds an engine over `store` with no compensating wait.
pub fn engine(store: &Arc<InMemoryTaskStore>) -> TestEngine {
    let settings = EngineSettings {
        workspace: WorkspaceId::new("1209000000000000")
            .expect("valid workspace id"),
        project: project(),
        directory: directory(),
        policy: CompensatingDelay::new(Duration::ZERO),
    };
    SyncEngine::new(Arc::clone(store), Arc::new(TokioDelay), settings)
}

/// Opened issue authored by alice.
pub fn opened_issue(number: u64, title: &str) -> IssueEvent {
    IssueEvent::new(
        IssueNumber::from(number),
        format!("https://github.com/acme/widgets/issues/{number}"),
        title,
    )
    .with_author(login("alice"))
}

/// Builds a validated login.
pub fn login(value: &str) -> Login {
    Login::new(value).expect("valid login")
}

/// Builds a validated person id.
pub fn person(value: &str) -> PersonId {
    PersonId::new(value).expect("valid person id")
}
