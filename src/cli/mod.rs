//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `scan`: Scan a directory of Terraform files and report the entities
//! - `graph`: Generate dependency graph visualizations
//! - `radius`: List everything affected by a change to one entity
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Scan a local directory
//! tfblast scan ./terraform
//!
//! # Generate JSON report
//! tfblast scan ./terraform --format json --output report.json
//!
//! # Generate dependency graph
//! tfblast graph ./terraform --format dot --output deps.dot
//!
//! # Blast radius of one resource
//! tfblast radius ./terraform aws_vpc.main
//!
//! # Initialize configuration
//! tfblast init
//!
//! # Validate configuration
//! tfblast validate tfblast.yaml
//! ```

use crate::types::{GraphFormat, ReportFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tfblast - Terraform dependency graph and blast radius mapper.
#[derive(Parser, Debug)]
#[command(
    name = "tfblast",
    author,
    version,
    about = "Terraform dependency graph and blast radius mapper",
    long_about = "tfblast parses a directory of Terraform HCL files, registers every \
                  resource, data source, variable, output, and module, and builds a \
                  directed dependency graph showing what a change to each entity affects."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TFBLAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory of Terraform files and report the entities found
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Generate dependency graph visualization
    #[command(visible_alias = "g")]
    Graph(GraphArgs),

    /// List everything transitively affected by a change to one entity
    #[command(visible_alias = "r")]
    Radius(RadiusArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory containing Terraform files
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Abort on the first file that fails to parse
    #[arg(long)]
    pub fail_fast: bool,

    /// Patterns to exclude from scanning (glob patterns)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,
}

/// Arguments for the graph command.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Directory containing Terraform files
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format for the graph
    #[arg(short, long, default_value = "dot", value_enum)]
    pub format: GraphFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the radius command.
#[derive(Args, Debug)]
pub struct RadiusArgs {
    /// Directory containing Terraform files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Canonical identifier of the entity to start from
    /// (e.g. aws_vpc.main, data.aws_ami.ubuntu, my_variable)
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "tfblast.yaml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_command() {
        let cli = Cli::parse_from(["tfblast", "scan", "./terraform"]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.path, PathBuf::from("./terraform"));
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_with_options() {
        let cli = Cli::parse_from([
            "tfblast",
            "scan",
            "./terraform",
            "--format",
            "json",
            "--output",
            "report.json",
            "--fail-fast",
            "--exclude",
            "*_override.tf",
        ]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.format, ReportFormat::Json);
                assert_eq!(args.output, Some(PathBuf::from("report.json")));
                assert!(args.fail_fast);
                assert_eq!(args.exclude_patterns, vec!["*_override.tf".to_string()]);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_graph_command() {
        let cli = Cli::parse_from(["tfblast", "graph", "./terraform", "--format", "mermaid"]);
        match cli.command {
            Commands::Graph(args) => {
                assert_eq!(args.format, GraphFormat::Mermaid);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_radius_command() {
        let cli = Cli::parse_from(["tfblast", "radius", "./terraform", "aws_vpc.main"]);
        match cli.command {
            Commands::Radius(args) => {
                assert_eq!(args.identifier, "aws_vpc.main");
            }
            _ => panic!("Expected Radius command"),
        }
    }

    #[test]
    fn test_init_command() {
        let cli = Cli::parse_from(["tfblast", "init"]);
        assert!(matches!(cli.command, Commands::Init));
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["tfblast", "validate", "custom.yaml"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("custom.yaml"));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "tfblast",
            "-vvv",
            "--config",
            "custom.yaml",
            "scan",
            "./terraform",
        ]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_alias() {
        let cli = Cli::parse_from(["tfblast", "s", "./terraform"]);
        assert!(matches!(cli.command, Commands::Scan(_)));
    }
}
