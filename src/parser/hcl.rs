//! HCL file parser implementation.
//!
//! Walks one directory (non-recursive), reads every `.tf` file in sorted
//! path order, and registers the declared entities. Sorted order makes the
//! registry's last-write-wins collision rule deterministic regardless of
//! filesystem enumeration order.

use crate::config::Config;
use crate::error::{ErrorCollector, Result, TfBlastError};
use crate::parser::{body_to_value, ParsedEntity, Parser, TF_EXTENSION};
use crate::registry::{EntityKind, EntityRegistry};
use crate::types::ParsedSource;

use hcl::{Block, Body};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// HCL parser for Terraform files.
pub struct HclParser {
    /// Configuration for parsing behavior
    config: Config,
}

impl HclParser {
    /// Create a new HCL parser with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Parse all Terraform files directly inside a directory.
    ///
    /// The scan is non-recursive. Individual files that fail to parse are
    /// skipped with a warning when `scan.continue_on_error` is set (the
    /// default); the two input-level failures are always fatal.
    ///
    /// # Errors
    ///
    /// - [`TfBlastError::DirectoryNotFound`] if the directory is absent
    /// - [`TfBlastError::NoInputFiles`] if it holds no `.tf` files
    /// - [`TfBlastError::HclParse`] if a file is malformed and
    ///   `continue_on_error` is disabled
    pub async fn parse_directory(&self, path: &Path) -> Result<ParsedSource> {
        if !path.is_dir() {
            return Err(crate::err!(DirectoryNotFound {
                path: path.to_path_buf(),
            }));
        }

        let files = self.collect_input_files(path);
        if files.is_empty() {
            return Err(crate::err!(NoInputFiles {
                path: path.to_path_buf(),
            }));
        }

        let mut registry = EntityRegistry::new();
        let mut parsed_files = Vec::new();
        let mut error_collector = ErrorCollector::new();

        for file_path in files {
            tracing::debug!(file = %file_path.display(), "Parsing file");

            match self.parse_file(&file_path).await {
                Ok(entities) => {
                    for entity in entities {
                        registry.register(
                            entity.kind,
                            &entity.subtype,
                            &entity.name,
                            entity.config,
                            &file_path,
                        );
                    }
                    parsed_files.push(file_path);
                }
                Err(e) => {
                    if self.config.scan.continue_on_error && e.is_recoverable() {
                        tracing::warn!(
                            file = %file_path.display(),
                            "failed to parse file, continuing: {}",
                            e
                        );
                        error_collector.add(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        tracing::info!(
            entities = registry.len(),
            files = parsed_files.len(),
            errors = error_collector.count(),
            "Parsing complete"
        );

        Ok(ParsedSource {
            registry,
            files: parsed_files,
        })
    }

    /// Parse a single Terraform file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn parse_file(&self, path: &Path) -> Result<Vec<ParsedEntity>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TfBlastError::io(path, e, file!(), line!()))?;

        self.parse_content(&content, path)
    }

    /// List the `.tf` files directly inside a directory, sorted by path.
    fn collect_input_files(&self, path: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e.into_path()),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    None
                }
            })
            .filter(|p| p.is_file())
            .filter(|p| self.is_terraform_file(p))
            .filter(|p| !self.should_skip(p))
            .collect();

        files.sort();
        files
    }

    /// Check if a path should be skipped.
    fn should_skip(&self, path: &Path) -> bool {
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            // Skip hidden files
            if file_name.starts_with('.') {
                tracing::debug!(path = %path.display(), reason = "hidden file", "Skipping path");
                return true;
            }

            // Check config exclusions
            if self.config.scan.exclude_patterns.iter().any(|pattern| {
                glob::Pattern::new(pattern)
                    .map(|p| p.matches(file_name))
                    .unwrap_or(false)
            }) {
                tracing::debug!(path = %path.display(), reason = "matches exclude pattern", "Skipping path");
                return true;
            }
        }

        false
    }

    /// Check if a file is a Terraform file.
    fn is_terraform_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == TF_EXTENSION)
    }
}

impl Parser for HclParser {
    fn parse_content(&self, content: &str, file_path: &Path) -> Result<Vec<ParsedEntity>> {
        let body: Body = hcl::from_str(content).map_err(|e| {
            crate::err!(HclParse {
                file: file_path.to_path_buf(),
                message: e.to_string(),
                line: None,
                column: None,
            })
        })?;

        let mut entities = Vec::new();

        for structure in body.into_inner() {
            if let hcl::Structure::Block(block) = structure {
                match block.identifier.as_str() {
                    "resource" => {
                        extract_typed_entity(&block, EntityKind::Resource, file_path, &mut entities);
                    }
                    "data" => {
                        extract_typed_entity(&block, EntityKind::DataSource, file_path, &mut entities);
                    }
                    "variable" => {
                        extract_named_entity(&block, EntityKind::Variable, file_path, &mut entities);
                    }
                    "output" => {
                        extract_named_entity(&block, EntityKind::Output, file_path, &mut entities);
                    }
                    "module" => {
                        extract_named_entity(&block, EntityKind::Module, file_path, &mut entities);
                    }
                    _ => {
                        // Other block types (terraform, provider, locals, ...)
                        // are outside the entity model.
                    }
                }
            }
        }

        Ok(entities)
    }
}

/// Extract a block with `<type> <name>` labels (resource, data).
fn extract_typed_entity(
    block: &Block,
    kind: EntityKind,
    file_path: &Path,
    entities: &mut Vec<ParsedEntity>,
) {
    let (Some(subtype), Some(name)) = (label_at(block, 0), label_at(block, 1)) else {
        tracing::warn!(
            kind = %kind,
            file = %file_path.display(),
            "Block is missing its type/name labels, skipping"
        );
        return;
    };

    entities.push(ParsedEntity {
        kind,
        subtype,
        name,
        config: body_to_value(&block.body),
    });
}

/// Extract a block with a single `<name>` label (variable, output, module).
fn extract_named_entity(
    block: &Block,
    kind: EntityKind,
    file_path: &Path,
    entities: &mut Vec<ParsedEntity>,
) {
    let Some(name) = label_at(block, 0) else {
        tracing::warn!(
            kind = %kind,
            file = %file_path.display(),
            "Block is missing its name label, skipping"
        );
        return;
    };

    entities.push(ParsedEntity {
        kind,
        subtype: String::new(),
        name,
        config: body_to_value(&block.body),
    });
}

fn label_at(block: &Block, index: usize) -> Option<String> {
    block.labels.get(index).map(|l| l.as_str().to_string())
}
