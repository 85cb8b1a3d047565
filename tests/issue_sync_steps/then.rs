//! Then steps for issue synchronization BDD scenarios.

use super::world::SyncWorld;
use issue_sync::sync::domain::{IssueNumber, Participants, PersonId, Task};
use rstest_bdd_macros::then;

fn single_task(world: &SyncWorld, number: u64) -> Result<Task, eyre::Report> {
    let tasks = world.store.tasks_for_issue(&IssueNumber::from(number))?;
    eyre::ensure!(
        tasks.len() == 1,
        "expected exactly one task for issue #{number}, found {}",
        tasks.len()
    );
    tasks
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("expected a task for issue #{number}"))
}

#[then("exactly one task tracks issue #{number:u64}")]
fn one_task_tracks_issue(world: &SyncWorld, number: u64) -> Result<(), eyre::Report> {
    single_task(world, number).map(|_| ())
}

#[then(r#"the task for issue #{number:u64} has participants "{expected}""#)]
fn task_has_participants(
    world: &SyncWorld,
    number: u64,
    expected: String,
) -> Result<(), eyre::Report> {
    let task = single_task(world, number)?;
    let wanted = expected
        .split(',')
        .map(PersonId::new)
        .collect::<Result<Participants, _>>()?;
    eyre::ensure!(
        task.participants == wanted,
        "expected participants {wanted:?}, found {:?}",
        task.participants
    );
    Ok(())
}

#[then("the task for issue #{number:u64} is completed")]
fn task_is_completed(world: &SyncWorld, number: u64) -> Result<(), eyre::Report> {
    let task = single_task(world, number)?;
    eyre::ensure!(task.completed, "expected task {} to be completed", task.id);
    Ok(())
}

#[then(r#"the operation fails with "{message}""#)]
fn operation_fails_with(world: &SyncWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing result in scenario world"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected failure, got {result:?}"));
    };
    eyre::ensure!(
        err.to_string().contains(&message),
        "expected error containing '{message}', got '{err}'"
    );
    Ok(())
}

#[then("no task changes were made by the last operation")]
fn no_task_changes(world: &SyncWorld) -> Result<(), eyre::Report> {
    let mutations = world.store.mutations()?.len();
    eyre::ensure!(
        mutations == world.mutations_before_last,
        "expected no mutating calls, found {} new",
        mutations - world.mutations_before_last
    );
    Ok(())
}
