//! Request controller
//!
//! Owns the depot tree and the session registry, and dispatches parsed
//! requests to client-info/client-create, sync, and submit handling. Each
//! request runs synchronously to completion; all error paths produce an
//! unsuccessful response with a fixed message rather than unwinding.

use crate::changelist::ChangeList;
use crate::client::{Client, LookupError, SessionRegistry};
use crate::error::TreeError;
use crate::protocol::{DepotFile, Request, Response};
use crate::tree::{DepotLoader, DepotPath, DepotTree};
use parking_lot::Mutex;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// The depot server core: depot tree plus session registry.
pub struct Controller {
    tree: DepotTree,
    registry: SessionRegistry,
}

impl Controller {
    /// Bootstrap a controller by bulk-loading an existing directory tree
    /// from `depot_root`. This is the only point where durable storage is
    /// read; everything after is in-memory.
    pub fn bootstrap(depot_root: &Path) -> Result<Self, TreeError> {
        let tree = DepotLoader::new(depot_root.to_path_buf()).load()?;
        Ok(Self::with_tree(tree))
    }

    /// Build a controller around an already-populated depot tree.
    pub fn with_tree(tree: DepotTree) -> Self {
        Self {
            tree,
            registry: SessionRegistry::new(),
        }
    }

    pub fn tree(&self) -> &DepotTree {
        &self.tree
    }

    /// Handle one request, mutating the registry (client create) or the
    /// depot (submit) as a side effect.
    #[instrument(skip(self, request), fields(username = request.username(), client = request.client_name()))]
    pub fn handle(&mut self, request: Request) -> Response {
        let response = match request {
            Request::ClientInfo {
                username,
                client_name,
            } => self.client_info(&username, &client_name),
            Request::ClientCreate {
                username,
                client_name,
                depot_path,
            } => self.client_create(username, client_name, depot_path),
            Request::SyncAll {
                username,
                client_name,
            } => self.sync_all(&username, &client_name),
            Request::SyncFile {
                username,
                client_name,
                file_path,
            } => self.sync_file(&username, &client_name, &file_path),
            Request::Submit {
                username,
                client_name,
                change_list,
            } => self.submit(&username, &client_name, change_list),
        };
        if !response.is_successful {
            warn!(message = %response.message, "Request failed");
        }
        response
    }

    fn client_info(&self, username: &str, client_name: &str) -> Response {
        match self.registry.get(username, client_name) {
            Ok(client) => Response::with_message(client.to_string()),
            Err(err) => lookup_failure(err, username, client_name),
        }
    }

    fn client_create(
        &mut self,
        username: String,
        client_name: String,
        depot_path: DepotPath,
    ) -> Response {
        if !self.tree.exists(&depot_path) {
            return Response::failure("Invalid depot path");
        }
        info!(depot_path = %depot_path, "Client created");
        self.registry
            .insert(username, Client::new(client_name, depot_path));
        Response::success()
    }

    fn sync_all(&self, username: &str, client_name: &str) -> Response {
        let client = match self.registry.get(username, client_name) {
            Ok(client) => client,
            Err(err) => return lookup_failure(err, username, client_name),
        };
        // full checkout: paths come back relative to the client root
        let files = self.tree.get(client.depot_path(), &DepotPath::root());
        debug!(file_count = files.len(), "Full sync");
        Response::with_files(into_depot_files(files))
    }

    fn sync_file(&self, username: &str, client_name: &str, file_path: &DepotPath) -> Response {
        let client = match self.registry.get(username, client_name) {
            Ok(client) => client,
            Err(err) => return lookup_failure(err, username, client_name),
        };
        let absolute = client.depot_path().combine(file_path);
        if !self.tree.exists(&absolute) {
            return Response::failure(format!("Invalid file path {}", file_path));
        }
        Response::with_files(into_depot_files(self.tree.get(&absolute, file_path)))
    }

    fn submit(
        &mut self,
        username: &str,
        client_name: &str,
        change_list: Option<ChangeList>,
    ) -> Response {
        let client = match self.registry.get(username, client_name) {
            Ok(client) => client.clone(),
            Err(err) => return lookup_failure(err, username, client_name),
        };
        let change_list = match change_list {
            Some(list) if !list.is_empty() => list,
            _ => return Response::failure("Invalid changelist"),
        };
        match change_list.apply(&mut self.tree, client.depot_path()) {
            Ok(()) => {
                info!(changes = change_list.len(), "Changelist applied");
                Response::success()
            }
            Err(err) => Response::failure(err.to_string()),
        }
    }
}

fn lookup_failure(err: LookupError, username: &str, client_name: &str) -> Response {
    match err {
        LookupError::UnknownUser => Response::failure(format!("User {} not found", username)),
        LookupError::UnknownClient => Response::failure(format!(
            "User {} doesn't have client {}",
            username, client_name
        )),
    }
}

fn into_depot_files(files: Vec<(DepotPath, String)>) -> Vec<DepotFile> {
    files
        .into_iter()
        .map(|(path, content)| DepotFile {
            path: path.to_string(),
            content,
        })
        .collect()
}

/// Exclusive-access wrapper for concurrent deployments.
///
/// One lock guards both the depot tree and the session registry: a
/// single-writer model, sufficient at the operation rates this server is
/// built for.
pub struct SharedController {
    inner: Mutex<Controller>,
}

impl SharedController {
    pub fn new(controller: Controller) -> Self {
        Self {
            inner: Mutex::new(controller),
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        self.inner.lock().handle(request)
    }
}
