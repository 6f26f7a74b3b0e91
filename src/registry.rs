//! Entity registry for parsed configuration blocks.
//!
//! The registry classifies parsed blocks into the five entity kinds and
//! stores each under a canonical identifier with its source attribution.
//! It is an explicit object threaded through the parse step and returned
//! from it; there is no process-wide state.
//!
//! # Identifier scheme
//!
//! - resources: `<subtype>.<name>` (e.g. `aws_vpc.main`)
//! - data sources: `data.<subtype>.<name>` (the prefix keeps them from
//!   colliding with a same-named resource)
//! - variables, outputs, modules: the bare declared name
//!
//! Identifiers are unique across the registry. A later declaration with a
//! duplicate identifier silently overwrites the earlier one (last file
//! wins, in file-processing order) while keeping the first occurrence's
//! position in iteration order. This matches the original tool's
//! behavior and is intentional, not a bug to fix.

use crate::parser::ConfigValue;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The five kinds of declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A managed resource (`resource` block)
    Resource,
    /// An external data lookup (`data` block)
    DataSource,
    /// An input variable (`variable` block)
    Variable,
    /// An output value (`output` block)
    Output,
    /// A nested module invocation (`module` block)
    Module,
}

impl EntityKind {
    /// The lowercase label used in exports (matches the block category).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::DataSource => "data",
            Self::Variable => "variable",
            Self::Output => "output",
            Self::Module => "module",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A declared entity: the atomic unit of the dependency graph.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    /// Canonical identifier, unique within one parse run
    pub identifier: String,
    /// Entity kind; immutable once set
    pub kind: EntityKind,
    /// Provider-specific type string; empty for variables and outputs
    pub subtype: String,
    /// Declared name (the last block label)
    pub name: String,
    /// Raw configuration, retained verbatim for reference extraction
    pub raw_config: ConfigValue,
    /// File the entity was declared in; attribution only, never identity
    pub source_file: PathBuf,
}

/// Registry of all entities found in one parse run.
///
/// Populated once during parsing, then read-only for the rest of the
/// program's life. Iteration order is deterministic: first-declaration
/// order, with duplicates collapsed onto their original position.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Entity>,
    order: Vec<String>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the canonical identifier for an entity.
    #[must_use]
    pub fn canonical_identifier(kind: EntityKind, subtype: &str, name: &str) -> String {
        match kind {
            EntityKind::Resource => format!("{subtype}.{name}"),
            EntityKind::DataSource => format!("data.{subtype}.{name}"),
            EntityKind::Variable | EntityKind::Output | EntityKind::Module => name.to_string(),
        }
    }

    /// Register an entity and return its canonical identifier.
    ///
    /// Duplicate identifiers overwrite the stored entity (last write wins)
    /// without changing its iteration position. No shape validation is
    /// performed; malformed configuration is stored as-is and simply
    /// yields no references downstream.
    pub fn register(
        &mut self,
        kind: EntityKind,
        subtype: &str,
        name: &str,
        raw_config: ConfigValue,
        source_file: &Path,
    ) -> String {
        let identifier = Self::canonical_identifier(kind, subtype, name);

        if self.entities.contains_key(&identifier) {
            tracing::debug!(
                identifier = %identifier,
                file = %source_file.display(),
                "Duplicate identifier, later declaration overwrites earlier one"
            );
        } else {
            self.order.push(identifier.clone());
        }

        self.entities.insert(
            identifier.clone(),
            Entity {
                identifier: identifier.clone(),
                kind,
                subtype: subtype.to_string(),
                name: name.to_string(),
                raw_config,
                source_file: source_file.to_path_buf(),
            },
        );

        identifier
    }

    /// Look up an entity by its canonical identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Entity> {
        self.entities.get(identifier)
    }

    /// Whether an identifier is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entities.contains_key(identifier)
    }

    /// Number of distinct entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate entities in deterministic first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Number of entities of a given kind.
    #[must_use]
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_resource(registry: &mut EntityRegistry, subtype: &str, name: &str, file: &str) {
        registry.register(
            EntityKind::Resource,
            subtype,
            name,
            ConfigValue::empty(),
            Path::new(file),
        );
    }

    #[test]
    fn test_identifier_scheme() {
        assert_eq!(
            EntityRegistry::canonical_identifier(EntityKind::Resource, "aws_vpc", "main"),
            "aws_vpc.main"
        );
        assert_eq!(
            EntityRegistry::canonical_identifier(EntityKind::DataSource, "aws_ami", "ubuntu"),
            "data.aws_ami.ubuntu"
        );
        assert_eq!(
            EntityRegistry::canonical_identifier(EntityKind::Variable, "", "region"),
            "region"
        );
        assert_eq!(
            EntityRegistry::canonical_identifier(EntityKind::Module, "", "network"),
            "network"
        );
    }

    #[test]
    fn test_data_source_never_collides_with_resource() {
        let mut registry = EntityRegistry::new();
        register_resource(&mut registry, "aws_ami", "ubuntu", "main.tf");
        registry.register(
            EntityKind::DataSource,
            "aws_ami",
            "ubuntu",
            ConfigValue::empty(),
            Path::new("data.tf"),
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("aws_ami.ubuntu"));
        assert!(registry.contains("data.aws_ami.ubuntu"));
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut registry = EntityRegistry::new();
        register_resource(&mut registry, "aws_vpc", "main", "a.tf");
        register_resource(&mut registry, "aws_subnet", "main", "a.tf");
        register_resource(&mut registry, "aws_vpc", "main", "b.tf");

        assert_eq!(registry.len(), 2);
        let ids: Vec<&str> = registry.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, vec!["aws_vpc.main", "aws_subnet.main"]);

        // Later file's declaration replaced the stored entity.
        let vpc = registry.get("aws_vpc.main").unwrap();
        assert_eq!(vpc.source_file, PathBuf::from("b.tf"));
    }

    #[test]
    fn test_count_of() {
        let mut registry = EntityRegistry::new();
        register_resource(&mut registry, "aws_vpc", "main", "a.tf");
        registry.register(
            EntityKind::Variable,
            "",
            "region",
            ConfigValue::empty(),
            Path::new("variables.tf"),
        );

        assert_eq!(registry.count_of(EntityKind::Resource), 1);
        assert_eq!(registry.count_of(EntityKind::Variable), 1);
        assert_eq!(registry.count_of(EntityKind::Output), 0);
    }
}
