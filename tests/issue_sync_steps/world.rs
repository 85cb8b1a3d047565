//! Shared world state for issue synchronization BDD scenarios.

use std::{sync::Arc, time::Duration};

use issue_sync::{
    action::{self, Action, RunError, SyncEvent},
    sync::{
        adapters::memory::InMemoryTaskStore,
        domain::{IssueEvent, Login, PersonId, ProjectId, UserDirectory, WorkspaceId},
        ports::TokioDelay,
        services::{CompensatingDelay, EngineSettings, SyncEngine, SyncOutcome},
    },
};
use rstest::fixture;

/// Scenario world for issue synchronization behaviour tests.
pub struct SyncWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub directory: Vec<(Login, PersonId)>,
    pub pending_issue: Option<IssueEvent>,
    pub mutations_before_last: usize,
    pub last_result: Option<Result<SyncOutcome, RunError>>,
}

impl SyncWorld {
    /// Creates a world with an empty store and directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryTaskStore::new()),
            directory: Vec::new(),
            pending_issue: None,
            mutations_before_last: 0,
            last_result: None,
        }
    }

    /// Project every scenario files tasks under.
    pub fn project() -> Result<ProjectId, eyre::Report> {
        Ok(ProjectId::new("P-board")?)
    }

    fn engine(&self) -> Result<SyncEngine<InMemoryTaskStore, TokioDelay>, eyre::Report> {
        let settings = EngineSettings {
            workspace: WorkspaceId::new("W1")?,
            project: Self::project()?,
            directory: UserDirectory::from_entries(self.directory.clone()),
            policy: CompensatingDelay::new(Duration::ZERO),
        };
        Ok(SyncEngine::new(
            Arc::clone(&self.store),
            Arc::new(TokioDelay),
            settings,
        ))
    }

    /// Runs `selector` against `event`, recording the result.
    pub fn dispatch(&mut self, selector: &str, event: SyncEvent) -> Result<(), eyre::Report> {
        self.mutations_before_last = self.store.mutations()?.len();
        let engine = self.engine()?;
        let result = match selector.parse::<Action>() {
            Ok(parsed) => run_async(action::run(&engine, parsed, &event)),
            Err(err) => Err(RunError::from(err)),
        };
        self.last_result = Some(result);
        Ok(())
    }
}

impl Default for SyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SyncWorld {
    SyncWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
