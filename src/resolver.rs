//! Reference extraction over raw entity configuration.
//!
//! A recursive structural walk: mappings and sequences recurse, scalars
//! contribute nothing, and `References` markers contribute the canonical
//! identifiers of their descriptors. The result is a set, so a
//! configuration referencing the same entity twice yields one entry.
//!
//! Nesting depth is assumed finite and small; the walk carries no depth
//! limit. Whether an extracted identifier actually names a registered
//! entity is the graph builder's concern, not this module's.

use crate::parser::ConfigValue;
use std::collections::BTreeSet;

/// Extract the set of entity identifiers referenced by a configuration.
#[must_use]
pub fn extract_references(config: &ConfigValue) -> BTreeSet<String> {
    let mut references = BTreeSet::new();
    collect(config, &mut references);
    references
}

fn collect(value: &ConfigValue, references: &mut BTreeSet<String>) {
    match value {
        ConfigValue::Mapping(entries) => {
            for (_, nested) in entries {
                collect(nested, references);
            }
        }
        ConfigValue::Sequence(items) => {
            for item in items {
                collect(item, references);
            }
        }
        ConfigValue::Scalar(_) => {}
        ConfigValue::References(refs) => {
            references.extend(refs.iter().map(|r| r.name.clone()));
        }
    }
}
