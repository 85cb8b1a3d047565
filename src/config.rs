//! Configuration surface for the sync engine.
//!
//! Values arrive as opaque strings from the invoking platform. [`ActionInputs`]
//! reads them through a lookup function so the source (environment, CLI,
//! tests) stays the caller's choice.

use crate::{
    action::{Action, InvalidActionError},
    sync::{
        domain::{DirectoryError, FieldId, ProjectId, SyncDomainError, UserDirectory, WorkspaceId},
        services::{CompensatingDelay, EngineSettings},
    },
};
use std::{fmt, time::Duration};
use thiserror::Error;

/// Input naming the action to run.
pub const INPUT_ACTION: &str = "action";
/// Input holding the task-store access credential.
pub const INPUT_SECRET: &str = "asana-secret";
/// Input holding the workspace identifier.
pub const INPUT_WORKSPACE: &str = "asana-workspace-id";
/// Input holding the project identifier.
pub const INPUT_PROJECT: &str = "asana-project-id";
/// Input holding the correlation custom field identifier.
pub const INPUT_CORRELATION_FIELD: &str = "asana-custom-field";
/// Input holding the participants custom field identifier.
pub const INPUT_PARTICIPANTS_FIELD: &str = "asana-participants-field";
/// Optional input holding the JSON login-to-person map.
pub const INPUT_USER_MAP: &str = "user-map";
/// Optional input overriding the compensating delay, in seconds.
pub const INPUT_RETRY_DELAY: &str = "search-retry-delay-secs";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required input is missing or blank.
    #[error("missing required input '{0}'")]
    Missing(&'static str),

    /// An input has an unusable value.
    #[error("invalid input '{input}': {reason}")]
    Invalid {
        /// Input name.
        input: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The user map could not be built.
    #[error("invalid input 'user-map': {0}")]
    Directory(#[from] DirectoryError),

    /// The action selector is unknown.
    #[error(transparent)]
    Action(#[from] InvalidActionError),
}

/// Task-store access credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a credential.
    #[must_use]
    pub const fn new(secret: String) -> Self {
        Self(secret)
    }

    /// Returns the credential for handing to a transport.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Identifiers of the task custom fields the engine writes.
///
/// The engine itself works with typed task slots and never reads these ids.
/// They are carried for a hosted [`crate::sync::ports::TaskStore`] adapter,
/// which maps the slots onto the store's custom fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFields {
    /// Field holding the issue number.
    pub correlation: FieldId,
    /// Field holding the participant set.
    pub participants: FieldId,
}

/// Everything the sync engine and its store adapter need at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Workspace new tasks are created in.
    pub workspace: WorkspaceId,
    /// Project tasks are searched in and filed under.
    pub project: ProjectId,
    /// Custom field identifiers, consumed by a hosted store adapter.
    pub fields: CustomFields,
    /// Task-store access credential, consumed by a hosted store adapter.
    /// [`InMemoryTaskStore`](crate::sync::adapters::memory::InMemoryTaskStore)
    /// needs neither.
    pub token: AccessToken,
    /// Login to person mapping.
    pub directory: UserDirectory,
    /// Re-query policy for the task locator.
    pub policy: CompensatingDelay,
}

impl SyncConfig {
    /// Returns the settings consumed by [`crate::sync::services::SyncEngine`].
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            workspace: self.workspace.clone(),
            project: self.project.clone(),
            directory: self.directory.clone(),
            policy: self.policy,
        }
    }
}

/// Action selector and configuration read from the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    /// Operation to run.
    pub action: Action,
    /// Engine configuration.
    pub config: SyncConfig,
}

impl ActionInputs {
    /// Reads inputs through `lookup`, which maps an input name such as
    /// `asana-project-id` to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required input is missing or any
    /// input fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let action = required(&lookup, INPUT_ACTION)?.parse::<Action>()?;
        let token = AccessToken::new(required(&lookup, INPUT_SECRET)?);
        let workspace = identifier(&lookup, INPUT_WORKSPACE, WorkspaceId::new)?;
        let project = identifier(&lookup, INPUT_PROJECT, ProjectId::new)?;
        let fields = CustomFields {
            correlation: identifier(&lookup, INPUT_CORRELATION_FIELD, FieldId::new)?,
            participants: identifier(&lookup, INPUT_PARTICIPANTS_FIELD, FieldId::new)?,
        };
        let directory = optional(&lookup, INPUT_USER_MAP)
            .map(|raw| UserDirectory::from_json(&raw))
            .transpose()?
            .unwrap_or_default();
        let policy = optional(&lookup, INPUT_RETRY_DELAY)
            .map(|raw| parse_delay(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            action,
            config: SyncConfig {
                workspace,
                project,
                fields,
                token,
                directory,
                policy,
            },
        })
    }

    /// Reads inputs from `INPUT_<NAME>` environment variables, the way
    /// workflow runners expose action inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required input is missing or any
    /// input fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(input_env_name(name)).ok())
    }
}

/// Returns the environment variable carrying the input `name`.
#[must_use]
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn optional<F>(lookup: &F, input: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(input)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, input: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, input).ok_or(ConfigError::Missing(input))
}

fn identifier<F, T>(
    lookup: &F,
    input: &'static str,
    build: impl FnOnce(String) -> Result<T, SyncDomainError>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    build(required(lookup, input)?).map_err(|err| ConfigError::Invalid {
        input,
        reason: err.to_string(),
    })
}

fn parse_delay(raw: &str) -> Result<CompensatingDelay, ConfigError> {
    raw.parse::<u64>()
        .map(|secs| CompensatingDelay::new(Duration::from_secs(secs)))
        .map_err(|err| ConfigError::Invalid {
            input: INPUT_RETRY_DELAY,
            reason: err.to_string(),
        })
}
