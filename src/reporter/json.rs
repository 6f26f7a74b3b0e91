//! JSON report generator.

use crate::config::Config;
use crate::error::Result;
use crate::registry::EntityKind;
use crate::reporter::ReportGenerator;
use crate::types::ScanResult;
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &ScanResult) -> Result<String> {
        let report = JsonReport::from(result);

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };

        json.map_err(|e| {
            crate::err!(ReportGeneration {
                message: format!("Failed to serialize JSON report: {e}"),
            })
        })
    }
}

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: ReportSummary,
    /// All registered entities
    pub entities: Vec<JsonEntity>,
    /// All dependency edges, as (referenced, referencing) pairs
    pub edges: Vec<JsonEdge>,
}

impl From<&ScanResult> for JsonReport {
    fn from(result: &ScanResult) -> Self {
        Self {
            metadata: ReportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                files_scanned: result.files_scanned.len(),
            },
            summary: ReportSummary {
                total_entities: result.registry.len(),
                total_edges: result.graph.edge_count(),
                resources: result.registry.count_of(EntityKind::Resource),
                data_sources: result.registry.count_of(EntityKind::DataSource),
                variables: result.registry.count_of(EntityKind::Variable),
                outputs: result.registry.count_of(EntityKind::Output),
                modules: result.registry.count_of(EntityKind::Module),
            },
            entities: result.registry.iter().map(JsonEntity::from).collect(),
            edges: result
                .graph
                .edges()
                .map(|(from, to)| JsonEdge {
                    from: from.id.clone(),
                    to: to.id.clone(),
                })
                .collect(),
        }
    }
}

/// Report metadata.
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    /// tfblast version
    pub version: String,
    /// Report generation timestamp
    pub timestamp: String,
    /// Number of files scanned
    pub files_scanned: usize,
}

/// Report summary.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    /// Total registered entities
    pub total_entities: usize,
    /// Total dependency edges
    pub total_edges: usize,
    /// Resource count
    pub resources: usize,
    /// Data source count
    pub data_sources: usize,
    /// Variable count
    pub variables: usize,
    /// Output count
    pub outputs: usize,
    /// Module count
    pub modules: usize,
}

/// JSON representation of an entity.
#[derive(Debug, Serialize)]
pub struct JsonEntity {
    /// Canonical identifier
    pub identifier: String,
    /// Entity kind
    pub kind: EntityKind,
    /// Provider-specific type
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtype: String,
    /// Declared name
    pub name: String,
    /// File where declared
    pub source_file: String,
}

impl From<&crate::registry::Entity> for JsonEntity {
    fn from(entity: &crate::registry::Entity) -> Self {
        Self {
            identifier: entity.identifier.clone(),
            kind: entity.kind,
            subtype: entity.subtype.clone(),
            name: entity.name.clone(),
            source_file: entity.source_file.to_string_lossy().to_string(),
        }
    }
}

/// JSON representation of a dependency edge.
#[derive(Debug, Serialize)]
pub struct JsonEdge {
    /// Referenced entity
    pub from: String,
    /// Referencing entity
    pub to: String,
}
