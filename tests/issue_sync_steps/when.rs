//! When steps for issue synchronization BDD scenarios.

use super::world::SyncWorld;
use issue_sync::{
    action::SyncEvent,
    sync::domain::{CommentEvent, IssueNumber, IssueState, Login},
};
use rstest_bdd_macros::when;

#[when(r#"the issue is sent with action "{selector}""#)]
fn issue_sent(world: &mut SyncWorld, selector: String) -> Result<(), eyre::Report> {
    let issue = world
        .pending_issue
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending issue in scenario world"))?;
    world.dispatch(&selector, SyncEvent::Issue(issue))
}

#[when(r#"the issue is edited with assignee "{assignee}" and state "{state}""#)]
fn issue_edited(
    world: &mut SyncWorld,
    assignee: String,
    state: String,
) -> Result<(), eyre::Report> {
    let issue_state = match state.as_str() {
        "open" => IssueState::Open,
        "closed" => IssueState::Closed,
        other => return Err(eyre::eyre!("unsupported issue state '{other}'")),
    };
    let issue = world
        .pending_issue
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending issue in scenario world"))?
        .with_assignee(Login::new(assignee)?)
        .with_state(issue_state);
    world.dispatch("edit", SyncEvent::Issue(issue))
}

#[when(r#""{commenter}" comments on issue #{number:u64}"#)]
fn comment_posted(
    world: &mut SyncWorld,
    commenter: String,
    number: u64,
) -> Result<(), eyre::Report> {
    let comment = CommentEvent::new(IssueNumber::from(number), Login::new(commenter)?);
    world.dispatch("add-participant", SyncEvent::Comment(comment))
}
