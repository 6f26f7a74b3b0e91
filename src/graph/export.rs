//! Graph export functionality.
//!
//! This module provides functions to export the dependency graph
//! in various formats for visualization and analysis.

use crate::error::Result;
use crate::graph::types::{DependencyGraph, GraphNode};
use crate::registry::EntityKind;
use crate::types::GraphFormat;
use serde::Serialize;

/// Export the dependency graph to the specified format.
///
/// # Supported Formats
///
/// - **DOT**: Graphviz DOT format for visualization
/// - **JSON**: Structured JSON for programmatic access
/// - **Mermaid**: Mermaid diagram syntax for documentation
///
/// # Example
///
/// ```rust,no_run
/// use tfblast::graph::{export_graph, DependencyGraph};
/// use tfblast::types::GraphFormat;
///
/// let graph = DependencyGraph::new();
/// let dot = export_graph(&graph, GraphFormat::Dot).unwrap();
/// println!("{}", dot);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_graph(graph: &DependencyGraph, format: GraphFormat) -> Result<String> {
    match format {
        GraphFormat::Dot => export_dot(graph),
        GraphFormat::Json => export_json(graph),
        GraphFormat::Mermaid => export_mermaid(graph),
    }
}

/// Export to Graphviz DOT format.
///
/// Every node carries its classification attributes as fillcolor and
/// shape; edges are unadorned since they all mean the same relation.
fn export_dot(graph: &DependencyGraph) -> Result<String> {
    let mut dot = String::new();
    dot.push_str("digraph tfblast {\n");
    dot.push_str("    rankdir=TB;\n");
    dot.push_str("    node [style=filled];\n");
    dot.push_str("    \n");

    for node in graph.nodes() {
        let node_id = escape_dot_id(&node.id);
        let label = escape_dot_string(&node.id);
        dot.push_str(&format!(
            "    \"{node_id}\" [label=\"{label}\", fillcolor=\"{}\", shape={}];\n",
            node.color, node.shape
        ));
    }
    dot.push('\n');

    for (from, to) in graph.edges() {
        let from_id = escape_dot_id(&from.id);
        let to_id = escape_dot_id(&to.id);
        dot.push_str(&format!("    \"{from_id}\" -> \"{to_id}\";\n"));
    }

    dot.push_str("}\n");
    Ok(dot)
}

/// Export to JSON format.
fn export_json(graph: &DependencyGraph) -> Result<String> {
    #[derive(Serialize)]
    struct JsonGraph<'a> {
        nodes: Vec<&'a GraphNode>,
        edges: Vec<JsonEdge>,
        metadata: JsonMetadata,
    }

    #[derive(Serialize)]
    struct JsonEdge {
        from: String,
        to: String,
    }

    #[derive(Serialize)]
    struct JsonMetadata {
        total_nodes: usize,
        total_edges: usize,
        resource_count: usize,
        data_source_count: usize,
        variable_count: usize,
        output_count: usize,
        module_count: usize,
    }

    let nodes: Vec<&GraphNode> = graph.nodes().collect();

    let count_of = |kind: EntityKind| nodes.iter().filter(|n| n.kind == kind).count();
    let metadata = JsonMetadata {
        total_nodes: nodes.len(),
        total_edges: graph.edge_count(),
        resource_count: count_of(EntityKind::Resource),
        data_source_count: count_of(EntityKind::DataSource),
        variable_count: count_of(EntityKind::Variable),
        output_count: count_of(EntityKind::Output),
        module_count: count_of(EntityKind::Module),
    };

    let edges: Vec<JsonEdge> = graph
        .edges()
        .map(|(from, to)| JsonEdge {
            from: from.id.clone(),
            to: to.id.clone(),
        })
        .collect();

    let json_graph = JsonGraph {
        nodes,
        edges,
        metadata,
    };

    serde_json::to_string_pretty(&json_graph).map_err(|e| {
        crate::err!(ReportGeneration {
            message: format!("Failed to serialize graph to JSON: {e}"),
        })
    })
}

/// Export to Mermaid diagram format.
fn export_mermaid(graph: &DependencyGraph) -> Result<String> {
    let mut mermaid = String::new();
    mermaid.push_str("graph TD\n");

    for node in graph.nodes() {
        let id = sanitize_mermaid_id(&node.id);
        let label = escape_mermaid_string(&node.id);
        match node.shape.as_str() {
            "ellipse" => mermaid.push_str(&format!("    {id}((\"{label}\"))\n")),
            "diamond" => mermaid.push_str(&format!("    {id}{{\"{label}\"}}\n")),
            "cylinder" => mermaid.push_str(&format!("    {id}[(\"{label}\")]\n")),
            _ => mermaid.push_str(&format!("    {id}[\"{label}\"]\n")),
        }
    }

    mermaid.push('\n');

    for (from, to) in graph.edges() {
        let from_id = sanitize_mermaid_id(&from.id);
        let to_id = sanitize_mermaid_id(&to.id);
        mermaid.push_str(&format!("    {from_id} --> {to_id}\n"));
    }

    // Per-node fill colors from the classification tables
    mermaid.push('\n');
    for node in graph.nodes() {
        let id = sanitize_mermaid_id(&node.id);
        mermaid.push_str(&format!("    style {id} fill:{}\n", node.color));
    }

    Ok(mermaid)
}

/// Escape a string for use in DOT labels.
fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape a string for use as a DOT node ID.
fn escape_dot_id(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Sanitize a string for use as a Mermaid node ID.
fn sanitize_mermaid_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Escape a string for use in Mermaid labels.
fn escape_mermaid_string(s: &str) -> String {
    s.replace('"', "'").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::parser::{ConfigValue, Reference};
    use crate::registry::EntityRegistry;
    use std::path::Path;

    fn create_test_graph() -> DependencyGraph {
        let mut registry = EntityRegistry::new();
        registry.register(
            EntityKind::Resource,
            "aws_vpc",
            "main",
            ConfigValue::empty(),
            Path::new("main.tf"),
        );
        registry.register(
            EntityKind::Resource,
            "aws_subnet",
            "private",
            ConfigValue::References(vec![Reference {
                name: "aws_vpc.main".to_string(),
            }]),
            Path::new("main.tf"),
        );
        registry.register(
            EntityKind::Variable,
            "",
            "region",
            ConfigValue::empty(),
            Path::new("variables.tf"),
        );

        GraphBuilder::new().build(&registry).unwrap()
    }

    #[test]
    fn test_export_dot() {
        let graph = create_test_graph();
        let dot = export_dot(&graph).unwrap();

        assert!(dot.contains("digraph tfblast"));
        assert!(dot.contains("\"aws_vpc.main\""));
        assert!(dot.contains("fillcolor=\"#FF6B6B\""));
        assert!(dot.contains("\"aws_vpc.main\" -> \"aws_subnet.private\";"));
    }

    #[test]
    fn test_export_json() {
        let graph = create_test_graph();
        let json = export_json(&graph).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["metadata"]["total_nodes"].as_u64(), Some(3));
        assert_eq!(parsed["metadata"]["total_edges"].as_u64(), Some(1));
        assert_eq!(parsed["metadata"]["resource_count"].as_u64(), Some(2));
        assert_eq!(parsed["metadata"]["variable_count"].as_u64(), Some(1));
        assert_eq!(parsed["edges"][0]["from"].as_str(), Some("aws_vpc.main"));
        assert_eq!(parsed["edges"][0]["to"].as_str(), Some("aws_subnet.private"));
    }

    #[test]
    fn test_export_mermaid() {
        let graph = create_test_graph();
        let mermaid = export_mermaid(&graph).unwrap();

        assert!(mermaid.contains("graph TD"));
        assert!(mermaid.contains("aws_vpc_main --> aws_subnet_private"));
        // Variables render as ellipses
        assert!(mermaid.contains("region((\"region\"))"));
    }

    #[test]
    fn test_escape_dot_string() {
        assert_eq!(escape_dot_string("hello\nworld"), "hello\\nworld");
        assert_eq!(escape_dot_string("say \"hi\""), "say \\\"hi\\\"");
    }

    #[test]
    fn test_sanitize_mermaid_id() {
        assert_eq!(sanitize_mermaid_id("data.aws_ami.ubuntu"), "data_aws_ami_ubuntu");
    }
}
