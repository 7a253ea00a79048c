//! Credential store — read-only username lookup and password check.
//!
//! TRADE-OFFS
//! ==========
//! `StaticCredentialStore` compares plaintext passwords exactly. That is a
//! known insecure pattern kept for parity with existing `users.json` files;
//! it sits behind the `CredentialStore` trait so a hashed implementation can
//! replace it without touching the login route.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;

/// A single user record from the credential source. Extra keys such as
/// `email` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Read-only credential lookup.
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by username. Absent users yield `None`.
    fn find_credential(&self, username: &str) -> Option<&Credential>;

    /// Return the credential only when both username and password match.
    fn authenticate(&self, username: &str, password: &str) -> Option<&Credential> {
        self.find_credential(username)
            .filter(|credential| credential.password == password)
    }
}

/// In-memory credential store loaded once at startup.
#[derive(Debug, Default)]
pub struct StaticCredentialStore {
    by_username: HashMap<String, Credential>,
}

impl StaticCredentialStore {
    /// Build a store from an in-memory list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateUsername`] if a username appears twice.
    pub fn new(credentials: Vec<Credential>) -> Result<Self, ConfigError> {
        let mut by_username = HashMap::with_capacity(credentials.len());
        for credential in credentials {
            if by_username.contains_key(&credential.username) {
                return Err(ConfigError::DuplicateUsername(credential.username));
            }
            by_username.insert(credential.username.clone(), credential);
        }
        Ok(Self { by_username })
    }

    /// Load a JSON array of credential records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or contains
    /// duplicate usernames.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let credentials: Vec<Credential> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        Self::new(credentials)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn find_credential(&self, username: &str) -> Option<&Credential> {
        self.by_username.get(username)
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
