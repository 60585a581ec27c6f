//! Depot Tree
//!
//! The shared hierarchical file namespace. Every node is owned exclusively
//! by its parent directory; lookups, mutation, and recursive retrieval walk
//! the tree explicitly.

pub mod loader;
pub mod node;
pub mod path;

pub use loader::DepotLoader;
pub use node::{DepotTree, Node};
pub use path::DepotPath;
