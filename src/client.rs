//! Clients and the session registry
//!
//! A client is a named, per-user workspace mapped onto one depot subtree.
//! The registry is the server's only session state: it grows as clients are
//! created and is never pruned.

use crate::tree::DepotPath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An immutable workspace binding: client name plus the depot subtree it
/// views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    name: String,
    depot_path: DepotPath,
}

impl Client {
    pub fn new(name: impl Into<String>, depot_path: DepotPath) -> Self {
        Self {
            name: name.into(),
            depot_path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depot_path(&self) -> &DepotPath {
        &self.depot_path
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client {} -> /{}", self.name, self.depot_path)
    }
}

/// Why a registry lookup failed. The two cases produce distinct response
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    UnknownUser,
    UnknownClient,
}

/// Session registry: `(username, client name) -> Client`.
///
/// Re-creating a client under an existing `(user, name)` pair silently
/// replaces the previous binding. There is no protection against accidental
/// overwrite; that is the shipped behavior, kept pending a product decision.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    clients: HashMap<(String, String), Client>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the binding for `(username, client.name())`.
    pub fn insert(&mut self, username: impl Into<String>, client: Client) {
        self.clients
            .insert((username.into(), client.name().to_string()), client);
    }

    /// Look up a client, distinguishing an unknown user from an unknown
    /// client name under a known user.
    pub fn get(&self, username: &str, client_name: &str) -> Result<&Client, LookupError> {
        match self
            .clients
            .get(&(username.to_string(), client_name.to_string()))
        {
            Some(client) => Ok(client),
            None if self.knows_user(username) => Err(LookupError::UnknownClient),
            None => Err(LookupError::UnknownUser),
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn knows_user(&self, username: &str) -> bool {
        self.clients.keys().any(|(user, _)| user == username)
    }
}
