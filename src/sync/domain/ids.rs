//! Identifier and validated scalar types for the sync domain.

use super::SyncDomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Issue number from the external tracker, kept in string form because the
/// task store correlates on the textual value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IssueNumber(String);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyIssueNumber`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SyncDomainError::EmptyIssueNumber);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the issue number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for IssueNumber {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for IssueNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Issue trackers deliver the number as JSON integer; configuration
        // and the store deliver it as text.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self::from(value)),
            Raw::Text(value) => Self::new(value).map_err(serde::de::Error::custom),
        }
    }
}

impl AsRef<str> for IssueNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issue-tracker login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    /// Creates a validated login.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyLogin`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SyncDomainError::EmptyLogin);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the login as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase lookup key for this login.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl<'de> Deserialize<'de> for Login {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares an opaque, non-empty string identifier owned by the task store.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`SyncDomainError::EmptyIdentifier`] when the value is
            /// blank.
            pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
                let raw = value.into();
                let normalized = raw.trim();
                if normalized.is_empty() {
                    return Err(SyncDomainError::EmptyIdentifier($label));
                }
                Ok(Self(normalized.to_owned()))
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id!(
    /// Task identifier assigned by the task store on creation.
    TaskId,
    "task id"
);

opaque_id!(
    /// Task-store person identifier.
    PersonId,
    "person id"
);

opaque_id!(
    /// Task-store workspace identifier.
    WorkspaceId,
    "workspace id"
);

opaque_id!(
    /// Task-store project identifier.
    ProjectId,
    "project id"
);

opaque_id!(
    /// Task-store custom field identifier.
    FieldId,
    "field id"
);

impl TaskId {
    /// Creates a random task identifier for stores that do not assign
    /// their own.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
