//! Depot path value type
//!
//! A `DepotPath` is a normalized sequence of path segments. Normalization
//! applies Unicode NFC, splits on `/`, and drops empty segments, so
//! `"/proj/"`, `"proj"` and `"proj//"` all compare equal. The empty path is
//! the depot root.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Normalized depot path. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DepotPath {
    segments: Vec<String>,
}

impl DepotPath {
    /// Parse and normalize a path string.
    pub fn new(raw: &str) -> Self {
        let normalized: String = raw.nfc().collect();
        let segments = normalized
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        Self { segments }
    }

    /// The depot root (empty path).
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_str())
    }

    /// Join a relative path onto this one.
    pub fn combine(&self, relative: &DepotPath) -> DepotPath {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        DepotPath { segments }
    }

    /// Strip a leading prefix, returning the remainder.
    ///
    /// Returns `None` when `prefix` is not a prefix of this path.
    pub fn remove_prefix(&self, prefix: &DepotPath) -> Option<DepotPath> {
        if self.segments.len() < prefix.segments.len() {
            return None;
        }
        if self.segments[..prefix.segments.len()] != prefix.segments[..] {
            return None;
        }
        Some(DepotPath {
            segments: self.segments[prefix.segments.len()..].to_vec(),
        })
    }

    /// Split into parent directory path and final segment.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(DepotPath, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            DepotPath {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }
}

impl fmt::Display for DepotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<String> for DepotPath {
    fn from(raw: String) -> Self {
        DepotPath::new(&raw)
    }
}

impl From<DepotPath> for String {
    fn from(path: DepotPath) -> Self {
        path.to_string()
    }
}

impl From<&str> for DepotPath {
    fn from(raw: &str) -> Self {
        DepotPath::new(raw)
    }
}
