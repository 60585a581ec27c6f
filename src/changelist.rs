//! ChangeList
//!
//! An ordered batch of file mutations submitted against a client's depot
//! subtree. The whole batch is validated against the depot's current state
//! before any mutation is applied; a failed validation rejects the batch
//! atomically.
//!
//! Validation is deliberately snapshot-based: every precondition is checked
//! against the depot as it stands before the submit, not against the
//! intermediate states earlier changes in the same list would produce. An
//! Edit depending on an Add in the same list therefore fails validation.

use crate::error::{ApplyError, ChangeError};
use crate::tree::{DepotPath, DepotTree};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The kind of a single change.
///
/// `Other` keeps the wire format open: unrecognized kinds pass validation
/// unconditionally and are still applied. Whether that is the right call is
/// an open product question; the behavior is kept as shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeKind {
    Add,
    Delete,
    Edit,
    Other(String),
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Add => "add",
            ChangeKind::Delete => "delete",
            ChangeKind::Edit => "edit",
            ChangeKind::Other(kind) => kind.as_str(),
        }
    }
}

impl From<String> for ChangeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "add" => ChangeKind::Add,
            "delete" => ChangeKind::Delete,
            "edit" => ChangeKind::Edit,
            _ => ChangeKind::Other(raw),
        }
    }
}

impl From<ChangeKind> for String {
    fn from(kind: ChangeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One file mutation.
///
/// `path` is relative to the submitting client's depot subtree. `content`
/// is the new file content; `None` means the file is to be deleted, which
/// is only valid for `Delete` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub path: DepotPath,
    #[serde(default)]
    pub content: Option<String>,
}

impl Change {
    pub fn add(path: impl Into<DepotPath>, content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Add,
            path: path.into(),
            content: Some(content.into()),
        }
    }

    pub fn delete(path: impl Into<DepotPath>) -> Self {
        Self {
            kind: ChangeKind::Delete,
            path: path.into(),
            content: None,
        }
    }

    pub fn edit(path: impl Into<DepotPath>, content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Edit,
            path: path.into(),
            content: Some(content.into()),
        }
    }
}

/// An ordered list of changes, validated and applied as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeList {
    changes: Vec<Change>,
}

impl ChangeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a uniform-kind list from paths alone (no content, as for a
    /// batch of deletes).
    pub fn from_paths<P>(kind: ChangeKind, paths: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<DepotPath>,
    {
        Self {
            changes: paths
                .into_iter()
                .map(|path| Change {
                    kind: kind.clone(),
                    path: path.into(),
                    content: None,
                })
                .collect(),
        }
    }

    /// Build a uniform-kind list pairing each path with its new content.
    pub fn from_contents<P, C>(kind: ChangeKind, entries: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<DepotPath>,
        C: Into<String>,
    {
        Self {
            changes: entries
                .into_iter()
                .map(|(path, content)| Change {
                    kind: kind.clone(),
                    path: path.into(),
                    content: Some(content.into()),
                })
                .collect(),
        }
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// The client-relative path of the change at `index`.
    pub fn path_at(&self, index: usize) -> Option<&DepotPath> {
        self.changes.get(index).map(|c| &c.path)
    }

    /// Check every change against the depot's current state.
    ///
    /// Stops at the first failing change. Preconditions are evaluated
    /// against a single snapshot; effects of earlier changes in this list
    /// are not taken into account.
    pub fn validate(&self, tree: &DepotTree, client_root: &DepotPath) -> Result<(), ChangeError> {
        for change in &self.changes {
            let absolute = client_root.combine(&change.path);
            let relative = change.path.to_string();
            match change.kind {
                ChangeKind::Add => {
                    if tree.exists(&absolute) {
                        return Err(ChangeError::AlreadyExists(relative));
                    }
                    if change.content.is_none() {
                        return Err(ChangeError::MissingContent {
                            kind: "add",
                            path: relative,
                        });
                    }
                }
                ChangeKind::Delete => {
                    if !tree.exists(&absolute) {
                        return Err(ChangeError::FileNotFound {
                            kind: "delete",
                            path: relative,
                        });
                    }
                    if change.content.is_some() {
                        return Err(ChangeError::UnexpectedContent(relative));
                    }
                }
                ChangeKind::Edit => {
                    if !tree.exists(&absolute) {
                        return Err(ChangeError::FileNotFound {
                            kind: "edit",
                            path: relative,
                        });
                    }
                    if change.content.is_none() {
                        return Err(ChangeError::MissingContent {
                            kind: "edit",
                            path: relative,
                        });
                    }
                }
                // Unrecognized kinds have no precondition.
                ChangeKind::Other(_) => {}
            }
        }
        Ok(())
    }

    /// Validate, then apply every change in list order.
    ///
    /// On validation failure nothing is mutated. Once validation passes,
    /// each change is written with `DepotTree::add`; a tree fault mid-apply
    /// is propagated without rollback.
    #[instrument(skip(self, tree), fields(client_root = %client_root, changes = self.len()))]
    pub fn apply(&self, tree: &mut DepotTree, client_root: &DepotPath) -> Result<(), ApplyError> {
        self.validate(tree, client_root)?;
        for change in &self.changes {
            let absolute = client_root.combine(&change.path);
            debug!(kind = change.kind.as_str(), path = %change.path, "Applying change");
            tree.add(&absolute, change.content.clone())?;
        }
        Ok(())
    }
}
