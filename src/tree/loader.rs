//! Depot bootstrap loader
//!
//! One-time population of a `DepotTree` from an on-disk directory. Every
//! file under the root is read eagerly and inserted keyed by its path
//! relative to the root. Later mutation is in-memory only; nothing is
//! written back.

use crate::error::TreeError;
use crate::tree::node::DepotTree;
use crate::tree::path::DepotPath;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Loads an existing directory tree into a fresh `DepotTree`.
pub struct DepotLoader {
    root: PathBuf,
}

impl DepotLoader {
    /// Create a loader for the given storage root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the storage root and build the depot.
    ///
    /// Files are inserted in sorted path order for determinism. Symlinks are
    /// not followed.
    #[instrument(skip(self), fields(depot_root = %self.root.display()))]
    pub fn load(&self) -> Result<DepotTree, TreeError> {
        let start = Instant::now();

        let root = dunce::canonicalize(&self.root)
            .map_err(|_| TreeError::RootNotFound(self.root.clone()))?;

        let mut entries: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = entry.map_err(|e| {
                TreeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk depot root: {}", e),
                ))
            })?;
            if entry.file_type().is_file() {
                entries.push(entry.path().to_path_buf());
            }
        }
        entries.sort();

        let mut tree = DepotTree::new();
        for file_path in &entries {
            let content = std::fs::read_to_string(file_path)?;
            let depot_path = relative_depot_path(file_path, &root)?;
            debug!(path = %depot_path, bytes = content.len(), "Loaded depot file");
            tree.add(&depot_path, Some(content))?;
        }

        if entries.is_empty() {
            warn!("Depot root contains no files");
        }
        info!(
            file_count = entries.len(),
            duration_ms = start.elapsed().as_millis(),
            "Depot bootstrap completed"
        );
        Ok(tree)
    }
}

/// Rewrite an absolute filesystem path into a depot path relative to `root`.
fn relative_depot_path(path: &Path, root: &Path) -> Result<DepotPath, TreeError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        TreeError::InvalidPath(format!(
            "Path {:?} is not under depot root {:?}",
            path, root
        ))
    })?;

    let mut depot_path = DepotPath::root();
    for component in relative.components() {
        let segment = component.as_os_str().to_str().ok_or_else(|| {
            TreeError::InvalidPath(format!("Non-UTF-8 path component in {:?}", path))
        })?;
        depot_path = depot_path.combine(&DepotPath::new(segment));
    }
    Ok(depot_path)
}
