//! Immutable mapping from issue-tracker logins to task-store people.

use super::{DirectoryError, Login, PersonId, UnknownUserError};
use std::collections::{BTreeMap, HashMap};

/// Static lookup table from issue-tracker login to task-store person id.
///
/// Keys are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    entries: HashMap<String, PersonId>,
}

impl UserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from `(login, person)` pairs.
    ///
    /// Later entries win when two logins differ only by case.
    #[must_use]
    pub fn from_entries(pairs: impl IntoIterator<Item = (Login, PersonId)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(login, person)| (login.normalized(), person))
            .collect();
        Self { entries }
    }

    /// Parses a directory from a JSON object mapping logins to person ids.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Malformed`] when the input is not a JSON
    /// object of strings, or [`DirectoryError::Domain`] when a login or
    /// person id is blank.
    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        let parsed: BTreeMap<String, String> = serde_json::from_str(raw)
            .map_err(|err| DirectoryError::Malformed(err.to_string()))?;
        let entries = parsed
            .into_iter()
            .map(|(login, person)| Ok((Login::new(login)?, PersonId::new(person)?)))
            .collect::<Result<Vec<_>, DirectoryError>>()?;
        Ok(Self::from_entries(entries))
    }

    /// Resolves an optional login to a person id.
    ///
    /// `None` resolves to `None` without consulting the table.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownUserError`] when the login has no mapping.
    pub fn resolve(&self, login: Option<&Login>) -> Result<Option<PersonId>, UnknownUserError> {
        let Some(user) = login else {
            return Ok(None);
        };
        self.entries
            .get(&user.normalized())
            .cloned()
            .map(Some)
            .ok_or_else(|| UnknownUserError {
                login: user.clone(),
            })
    }

    /// Returns the number of mapped logins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no logins are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
