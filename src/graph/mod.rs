//! Dependency graph construction and export.
//!
//! This module builds a directed graph over the registered entities and
//! exports it for visualization:
//!
//! - [`types`]: Graph data structures
//! - [`builder`]: Two-phase graph construction from the registry
//! - [`export`]: Export to DOT, JSON, and Mermaid formats

pub mod builder;
pub mod export;
pub mod types;

pub use builder::GraphBuilder;
pub use export::export_graph;
pub use types::{DependencyGraph, GraphNode, NodeId};
