//! Graph type definitions.
//!
//! This module defines the core types used in the dependency graph:
//! - `DependencyGraph`: The main graph structure
//! - `GraphNode`: One entity with its presentation attributes
//! - `NodeId`: Unique identifier for nodes

use crate::registry::EntityKind;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

/// Unique identifier for a node in the graph.
///
/// This is the entity's canonical identifier (e.g. `aws_vpc.main`,
/// `data.aws_ami.ubuntu`, or a bare variable/output/module name).
pub type NodeId = String;

/// A node in the dependency graph: one entity plus the classification
/// attributes computed for it at build time.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Canonical entity identifier
    pub id: NodeId,
    /// Entity kind
    pub kind: EntityKind,
    /// Provider-specific type; empty for variables, outputs, modules
    pub subtype: String,
    /// Semantic group
    pub group: String,
    /// Fill color
    pub color: String,
    /// Rendering shape hint
    pub shape: String,
    /// File the entity was declared in
    pub source_file: PathBuf,
}

/// The dependency graph structure.
///
/// Wraps a petgraph directed graph and provides domain-specific
/// operations. Edge direction is referenced → referencing: an edge
/// `aws_vpc.main -> aws_subnet.private` means the subnet's configuration
/// references the VPC, so following edges forward walks the blast radius
/// of a change.
///
/// # Structure
///
/// ```text
/// DependencyGraph
/// ├── inner: DiGraph<GraphNode, ()>           // The actual graph
/// └── node_index: HashMap<NodeId, NodeIndex>  // Fast lookup by ID
/// ```
///
/// # Thread Safety
///
/// The graph is not thread-safe by default. For concurrent access,
/// wrap it in `Arc<RwLock<DependencyGraph>>`.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying petgraph directed graph
    inner: DiGraph<GraphNode, ()>,

    /// Index from canonical node ID to petgraph NodeIndex
    node_index: HashMap<NodeId, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph.
    ///
    /// Returns the node ID. If a node with the same ID already exists it
    /// is left untouched; IDs are unique because the registry already
    /// collapsed duplicate declarations.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let node_id = node.id.clone();

        if self.node_index.contains_key(&node_id) {
            return node_id;
        }

        let idx = self.inner.add_node(node);
        self.node_index.insert(node_id.clone(), idx);
        node_id
    }

    /// Add an edge from a referenced node to the node referencing it.
    ///
    /// Returns true if the edge was added, false if it already exists
    /// or if either node doesn't exist. Self-loops are representable;
    /// parallel edges are not.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId) -> bool {
        let from_idx = match self.node_index.get(from) {
            Some(&idx) => idx,
            None => return false,
        };
        let to_idx = match self.node_index.get(to) {
            Some(&idx) => idx,
            None => return false,
        };

        // Check if edge already exists
        if self.inner.find_edge(from_idx, to_idx).is_some() {
            return false;
        }

        self.inner.add_edge(from_idx, to_idx, ());
        true
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&idx| &self.inner[idx])
    }

    /// Whether a node with the given ID exists.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Get the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Get an iterator over all nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner.node_weights()
    }

    /// Get an iterator over all edges as (referenced, referencing) pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode)> {
        self.inner
            .edge_references()
            .map(|edge| (&self.inner[edge.source()], &self.inner[edge.target()]))
    }

    /// Get all nodes whose configuration references the given node
    /// (outgoing edges).
    #[must_use]
    pub fn get_dependents(&self, id: &str) -> Vec<&GraphNode> {
        let idx = match self.node_index.get(id) {
            Some(&idx) => idx,
            None => return Vec::new(),
        };

        self.inner
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|neighbor_idx| &self.inner[neighbor_idx])
            .collect()
    }

    /// Get all nodes the given node's configuration references
    /// (incoming edges).
    #[must_use]
    pub fn get_dependencies(&self, id: &str) -> Vec<&GraphNode> {
        let idx = match self.node_index.get(id) {
            Some(&idx) => idx,
            None => return Vec::new(),
        };

        self.inner
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .map(|neighbor_idx| &self.inner[neighbor_idx])
            .collect()
    }

    /// Compute the blast radius of a node: every node transitively
    /// affected by a change to it, in BFS order, excluding the node
    /// itself.
    #[must_use]
    pub fn blast_radius(&self, id: &str) -> Vec<&GraphNode> {
        let start = match self.node_index.get(id) {
            Some(&idx) => idx,
            None => return Vec::new(),
        };

        // Nodes are never removed, so indices stay within node_count.
        let mut visited = vec![false; self.inner.node_count()];
        let mut queue = VecDeque::new();
        let mut affected = Vec::new();

        visited[start.index()] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self
                .inner
                .neighbors_directed(current, petgraph::Direction::Outgoing)
            {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    affected.push(&self.inner[neighbor]);
                    queue.push_back(neighbor);
                }
            }
        }

        affected
    }

    /// Get the underlying petgraph for advanced operations.
    #[must_use]
    pub fn inner(&self) -> &DiGraph<GraphNode, ()> {
        &self.inner
    }
}
