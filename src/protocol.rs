//! Request and response shapes
//!
//! The wire format mirrors the untyped inbound shape (a `type` string plus
//! optional fields); it is parsed into the closed `Request` enum at the
//! boundary so the controller dispatches on typed variants only.

use crate::changelist::ChangeList;
use crate::tree::DepotPath;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inbound request as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub client_name: String,
    #[serde(default)]
    pub depot_path: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub change_list: Option<ChangeList>,
}

/// A parsed request. Dispatch is total over these variants.
#[derive(Debug, Clone)]
pub enum Request {
    /// "client" without a depot path: look up an existing client.
    ClientInfo {
        username: String,
        client_name: String,
    },
    /// "client" with a depot path: create (or silently replace) a client.
    ClientCreate {
        username: String,
        client_name: String,
        depot_path: DepotPath,
    },
    /// "sync" without a file path: full checkout of the client's subtree.
    SyncAll {
        username: String,
        client_name: String,
    },
    /// "sync" with a file path: retrieve one file.
    SyncFile {
        username: String,
        client_name: String,
        file_path: DepotPath,
    },
    /// "submit": validate and apply a changelist.
    Submit {
        username: String,
        client_name: String,
        change_list: Option<ChangeList>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Unknown request type {0}")]
    UnknownType(String),
}

impl TryFrom<WireRequest> for Request {
    type Error = RequestError;

    fn try_from(wire: WireRequest) -> Result<Self, Self::Error> {
        let WireRequest {
            kind,
            username,
            client_name,
            depot_path,
            file_path,
            change_list,
        } = wire;
        match kind.as_str() {
            "client" => Ok(match depot_path {
                Some(path) => Request::ClientCreate {
                    username,
                    client_name,
                    depot_path: DepotPath::new(&path),
                },
                None => Request::ClientInfo {
                    username,
                    client_name,
                },
            }),
            "sync" => Ok(match file_path {
                Some(path) => Request::SyncFile {
                    username,
                    client_name,
                    file_path: DepotPath::new(&path),
                },
                None => Request::SyncAll {
                    username,
                    client_name,
                },
            }),
            "submit" => Ok(Request::Submit {
                username,
                client_name,
                change_list,
            }),
            _ => Err(RequestError::UnknownType(kind)),
        }
    }
}

impl Request {
    pub fn username(&self) -> &str {
        match self {
            Request::ClientInfo { username, .. }
            | Request::ClientCreate { username, .. }
            | Request::SyncAll { username, .. }
            | Request::SyncFile { username, .. }
            | Request::Submit { username, .. } => username,
        }
    }

    pub fn client_name(&self) -> &str {
        match self {
            Request::ClientInfo { client_name, .. }
            | Request::ClientCreate { client_name, .. }
            | Request::SyncAll { client_name, .. }
            | Request::SyncFile { client_name, .. }
            | Request::Submit { client_name, .. } => client_name,
        }
    }
}

/// One synced file in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotFile {
    pub path: String,
    pub content: String,
}

/// Outbound response. `is_successful` defaults to true; error paths set it
/// to false together with a human-readable message. Message strings are
/// part of the observable contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default = "default_successful")]
    pub is_successful: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub files: Vec<DepotFile>,
}

fn default_successful() -> bool {
    true
}

impl Default for Response {
    fn default() -> Self {
        Self {
            is_successful: true,
            message: String::new(),
            files: Vec::new(),
        }
    }
}

impl Response {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_files(files: Vec<DepotFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            message: message.into(),
            files: Vec::new(),
        }
    }
}
