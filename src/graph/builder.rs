//! Graph construction from the entity registry.
//!
//! The builder runs two phases over the registry's final state:
//!
//! 1. **Nodes**: every registered entity becomes exactly one node, in
//!    registry iteration order, with its classification attributes
//!    computed up front.
//! 2. **Edges**: resource and module configurations are scanned for
//!    references; each reference that names a registered entity becomes
//!    one edge from the referenced node to the referencing node.
//!
//! References to identifiers with no registered entity are dropped
//! silently. Variable, output, and data source configurations are not
//! scanned, so those kinds only ever appear as edge sources.

use crate::classify;
use crate::error::Result;
use crate::graph::types::{DependencyGraph, GraphNode};
use crate::registry::{EntityKind, EntityRegistry};
use crate::resolver;

/// Builds a [`DependencyGraph`] from a populated registry.
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Create a new graph builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the dependency graph.
    ///
    /// Building is a pure function of the registry: the same registry
    /// contents always produce the same node and edge sets.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; the `Result` return keeps the
    /// call site uniform with the rest of the pipeline.
    pub fn build(&self, registry: &EntityRegistry) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();

        // Phase 1: one node per entity, in deterministic registry order.
        for entity in registry.iter() {
            let style = classify::style_for(entity.kind, &entity.subtype);
            graph.add_node(GraphNode {
                id: entity.identifier.clone(),
                kind: entity.kind,
                subtype: entity.subtype.clone(),
                group: style.group.to_string(),
                color: style.color.to_string(),
                shape: style.shape.to_string(),
                source_file: entity.source_file.clone(),
            });
        }

        // Phase 2: edges from referenced entities to the entities whose
        // configuration references them.
        let mut dropped = 0usize;
        for entity in registry.iter() {
            if !matches!(entity.kind, EntityKind::Resource | EntityKind::Module) {
                continue;
            }

            for referenced in resolver::extract_references(&entity.raw_config) {
                if graph.contains_node(&referenced) {
                    graph.add_edge(&referenced, &entity.identifier);
                } else {
                    tracing::debug!(
                        referenced = %referenced,
                        referencing = %entity.identifier,
                        "Reference does not name a registered entity, dropping"
                    );
                    dropped += 1;
                }
            }
        }

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped_references = dropped,
            "Graph construction complete"
        );

        Ok(graph)
    }
}
