//! Depot tree nodes and mutation primitives

use crate::error::TreeError;
use crate::tree::path::DepotPath;
use std::collections::BTreeMap;

/// A single node in the depot namespace.
///
/// Directories own their children outright; there is no aliasing of
/// subtrees. Children are kept in a `BTreeMap` so enumeration order is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory { children: BTreeMap<String, Node> },
    File { content: String },
}

impl Node {
    fn empty_dir() -> Node {
        Node::Directory {
            children: BTreeMap::new(),
        }
    }
}

/// The depot: a rooted ownership tree of directories and files.
#[derive(Debug, Clone, Default)]
pub struct DepotTree {
    root: Node,
}

impl Default for Node {
    fn default() -> Self {
        Node::empty_dir()
    }
}

impl DepotTree {
    pub fn new() -> Self {
        Self {
            root: Node::empty_dir(),
        }
    }

    /// Whether a file or directory exists at `path`.
    pub fn exists(&self, path: &DepotPath) -> bool {
        self.find(path).is_some()
    }

    /// Create, overwrite, or delete the node at `path`.
    ///
    /// `Some(content)` writes a file, creating intermediate directories as
    /// needed. `None` deletes the node at `path`; deleting a missing path is
    /// a no-op. Fails if a non-final segment resolves to a file, or if the
    /// target is the depot root.
    pub fn add(&mut self, path: &DepotPath, content: Option<String>) -> Result<(), TreeError> {
        let (parent_path, name) = path
            .split_last()
            .ok_or_else(|| TreeError::InvalidPath("depot root cannot be modified".to_string()))?;

        match content {
            Some(content) => {
                let dir = self.descend_or_create(&parent_path)?;
                dir.insert(name.to_string(), Node::File { content });
            }
            None => {
                if let Some(Node::Directory { children }) = self.find_mut(&parent_path) {
                    children.remove(name);
                }
            }
        }
        Ok(())
    }

    /// Recursively enumerate every file at or under `path`.
    ///
    /// Returned paths are rewritten relative to `alias`: a file at relative
    /// position `rel` under `path` is reported as `alias.combine(rel)`. When
    /// `path` names a file directly, the single result carries `alias`
    /// itself. A missing `path` yields no results.
    pub fn get(&self, path: &DepotPath, alias: &DepotPath) -> Vec<(DepotPath, String)> {
        let mut files = Vec::new();
        if let Some(node) = self.find(path) {
            collect_files(node, alias, &mut files);
        }
        files
    }

    fn find(&self, path: &DepotPath) -> Option<&Node> {
        let mut node = &self.root;
        for segment in path.segments() {
            match node {
                Node::Directory { children } => node = children.get(segment)?,
                Node::File { .. } => return None,
            }
        }
        Some(node)
    }

    fn find_mut(&mut self, path: &DepotPath) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for segment in path.segments() {
            match node {
                Node::Directory { children } => node = children.get_mut(segment)?,
                Node::File { .. } => return None,
            }
        }
        Some(node)
    }

    /// Walk to the directory at `path`, creating missing intermediate
    /// directories. Fails if any segment resolves to an existing file.
    fn descend_or_create(
        &mut self,
        path: &DepotPath,
    ) -> Result<&mut BTreeMap<String, Node>, TreeError> {
        let mut node = &mut self.root;
        for segment in path.segments() {
            let children = match node {
                Node::Directory { children } => children,
                Node::File { .. } => {
                    return Err(TreeError::NotADirectory(segment.to_string()));
                }
            };
            node = children
                .entry(segment.to_string())
                .or_insert_with(Node::empty_dir);
        }
        match node {
            Node::Directory { children } => Ok(children),
            Node::File { .. } => Err(TreeError::NotADirectory(path.to_string())),
        }
    }
}

fn collect_files(node: &Node, alias: &DepotPath, out: &mut Vec<(DepotPath, String)>) {
    match node {
        Node::File { content } => out.push((alias.clone(), content.clone())),
        Node::Directory { children } => {
            for (name, child) in children {
                let child_alias = alias.combine(&DepotPath::new(name));
                collect_files(child, &child_alias, out);
            }
        }
    }
}
