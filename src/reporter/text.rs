//! Plain text report generator.

use crate::config::Config;
use crate::registry::EntityKind;
use crate::reporter::ReportGenerator;
use crate::types::ScanResult;
use crate::error::Result;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
            verbose: config.output.verbose,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &ScanResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push('\n');

        output.push_str(&self.format_summary(result));
        output.push('\n');

        if self.verbose && !result.registry.is_empty() {
            output.push_str(&self.format_entities(result));
            output.push('\n');
        }

        output.push_str(&self.format_footer(result));

        Ok(output)
    }
}

impl TextReporter {
    /// Format the report header.
    fn format_header(&self) -> String {
        let title = "tfblast Scan";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        if self.use_colors {
            format!(
                "\n{} {} {}\n{}\n",
                title.bright_white().bold(),
                version.dimmed(),
                format!("({})", timestamp).dimmed(),
                "=".repeat(80).bright_blue(),
            )
        } else {
            format!("\n{} {} ({})\n{}\n", title, version, timestamp, "=".repeat(80))
        }
    }

    /// Format the summary section.
    fn format_summary(&self, result: &ScanResult) -> String {
        let mut output = String::new();

        let section_title = if self.use_colors {
            "Summary".bright_cyan().bold().to_string()
        } else {
            "Summary".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Kind", "Count"]);

        for kind in [
            EntityKind::Resource,
            EntityKind::DataSource,
            EntityKind::Variable,
            EntityKind::Output,
            EntityKind::Module,
        ] {
            table.add_row(vec![
                Cell::new(kind.label()),
                Cell::new(result.registry.count_of(kind)),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');

        output.push_str(&format!(
            "\n  {} nodes, {} edges across {} files\n",
            result.graph.node_count(),
            result.graph.edge_count(),
            result.files_scanned.len(),
        ));

        output
    }

    /// Format the per-entity listing (verbose mode only).
    fn format_entities(&self, result: &ScanResult) -> String {
        let mut output = String::new();

        let section_title = if self.use_colors {
            "Entities".bright_cyan().bold().to_string()
        } else {
            "Entities".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Identifier", "Kind", "Group", "Dependents", "File"]);

        for entity in result.registry.iter() {
            let group = result
                .graph
                .get_node(&entity.identifier)
                .map(|n| n.group.clone())
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(&entity.identifier),
                Cell::new(entity.kind.label()),
                Cell::new(group),
                Cell::new(result.graph.get_dependents(&entity.identifier).len()),
                Cell::new(entity.source_file.display()),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format the report footer.
    fn format_footer(&self, result: &ScanResult) -> String {
        let message = format!(
            "Scan complete: {} entities registered",
            result.registry.len()
        );

        if self.use_colors {
            format!("\n{}\n", message.green())
        } else {
            format!("\n{message}\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::parser::ConfigValue;
    use crate::registry::EntityRegistry;
    use std::path::{Path, PathBuf};

    fn create_test_result() -> ScanResult {
        let mut registry = EntityRegistry::new();
        registry.register(
            EntityKind::Resource,
            "aws_vpc",
            "main",
            ConfigValue::empty(),
            Path::new("main.tf"),
        );
        let graph = GraphBuilder::new().build(&registry).unwrap();
        ScanResult {
            registry,
            graph,
            files_scanned: vec![PathBuf::from("main.tf")],
        }
    }

    fn plain_config() -> Config {
        let mut config = Config::default();
        config.output.colored = false;
        config
    }

    #[test]
    fn test_text_report_contains_summary() {
        let result = create_test_result();
        let reporter = TextReporter::new(&plain_config());

        let text = reporter.generate(&result).unwrap();
        assert!(text.contains("tfblast Scan"));
        assert!(text.contains("Summary"));
        assert!(text.contains("resource"));
        assert!(text.contains("1 nodes, 0 edges across 1 files"));
    }

    #[test]
    fn test_verbose_lists_entities() {
        let result = create_test_result();
        let mut config = plain_config();
        config.output.verbose = true;

        let text = TextReporter::new(&config).generate(&result).unwrap();
        assert!(text.contains("Entities"));
        assert!(text.contains("aws_vpc.main"));
    }

    #[test]
    fn test_non_verbose_omits_entity_table() {
        let result = create_test_result();
        let text = TextReporter::new(&plain_config())
            .generate(&result)
            .unwrap();
        assert!(!text.contains("Entities"));
    }
}
