//! # tfblast
//!
//! Terraform dependency graph and blast radius mapper.
//!
//! tfblast parses a directory of Terraform HCL files, registers every
//! resource, data source, variable, output, and module declaration, and
//! builds a directed dependency graph over them. Edges run from the
//! referenced entity to the entity referencing it, so following the graph
//! forward answers "what does a change to this break?".
//!
//! ## Architecture
//!
//! The pipeline has three stages:
//!
//! 1. **Parse** ([`parser`]): read every `.tf` file in the target
//!    directory, convert block bodies to a [`parser::ConfigValue`] tree
//!    with references resolved to canonical identifiers, and populate an
//!    [`registry::EntityRegistry`].
//! 2. **Build** ([`graph`]): one node per registered entity with its
//!    classification attributes ([`classify`]), then one edge per
//!    resolvable reference extracted by [`resolver`].
//! 3. **Report** ([`reporter`], [`graph::export`]): text/JSON reports
//!    and DOT/JSON/Mermaid graph exports.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfblast::{Config, Scanner};
//!
//! # async fn example() -> tfblast::Result<()> {
//! let scanner = Scanner::new(Config::default());
//! let result = scanner.scan_path(std::path::Path::new("./terraform")).await?;
//!
//! println!("{} entities, {} edges",
//!     result.registry.len(),
//!     result.graph.edge_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod parser;
pub mod registry;
pub mod reporter;
pub mod resolver;
pub mod types;

pub use config::Config;
pub use error::{Result, TfBlastError};
pub use registry::{Entity, EntityKind, EntityRegistry};
pub use types::{GraphFormat, ReportFormat, ScanResult};

use crate::graph::GraphBuilder;
use crate::parser::HclParser;
use std::path::Path;

/// The main scanner that orchestrates the parse and build stages.
pub struct Scanner {
    config: Config,
}

impl Scanner {
    /// Create a new scanner with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan a directory of Terraform files and build the dependency graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, contains no `.tf`
    /// files, or a file fails to parse with `continue_on_error` disabled.
    pub async fn scan_path(&self, path: &Path) -> Result<ScanResult> {
        tracing::info!(path = %path.display(), "Starting scan");

        let parser = HclParser::new(&self.config);
        let parsed = parser.parse_directory(path).await?;

        let graph = GraphBuilder::new().build(&parsed.registry)?;

        Ok(ScanResult {
            registry: parsed.registry,
            graph,
            files_scanned: parsed.files,
        })
    }
}
