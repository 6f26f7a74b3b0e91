//! Core data types shared across tfblast.

use crate::graph::DependencyGraph;
use crate::registry::EntityRegistry;
use clap::ValueEnum;
use std::path::PathBuf;

/// Everything a scan produces: the populated registry, the built graph,
/// and the list of files that contributed. Read-only once returned.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// The entity registry in its final, post-parse state
    pub registry: EntityRegistry,
    /// The dependency graph built from the registry
    pub graph: DependencyGraph,
    /// Files that were parsed, in processing order
    pub files_scanned: Vec<PathBuf>,
}

/// Output of the parse step, before graph construction.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// Registry populated from all parsed files
    pub registry: EntityRegistry,
    /// Files that were parsed, in processing order
    pub files: Vec<PathBuf>,
}

/// Output formats for the scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable CLI output
    Text,
    /// Machine-readable JSON
    Json,
}

/// Output formats for the graph export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Graphviz DOT
    Dot,
    /// Structured JSON (nodes, edges, metadata)
    Json,
    /// Mermaid diagram syntax
    Mermaid,
}
