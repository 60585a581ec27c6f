//! Depot: In-Memory Centralized Version Control
//!
//! A single shared hierarchical file namespace (the depot), per-user named
//! workspaces (clients) mapped onto depot subtrees, and batched file
//! mutations (changelists) validated and applied as a unit.

pub mod changelist;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod tree;
