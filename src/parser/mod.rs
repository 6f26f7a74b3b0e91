//! HCL parsing module for Terraform configuration files.
//!
//! This module turns raw configuration text into typed entity
//! declarations. The heavy lifting (tokenizing, expression trees) is
//! delegated to the `hcl-rs` crate; this layer extracts the five
//! recognized block categories and converts their bodies into the opaque
//! [`ConfigValue`] tree that reference extraction runs over.
//!
//! # Recognized blocks
//!
//! - `resource "<type>" "<name>"`
//! - `data "<type>" "<name>"`
//! - `variable "<name>"`
//! - `output "<name>"`
//! - `module "<name>"`
//!
//! Everything else (`terraform`, `provider`, `locals`, ...) is ignored.

mod hcl;
mod value;

pub use hcl::HclParser;
pub use value::{body_to_value, expression_to_value, ConfigValue, Reference};

use crate::registry::EntityKind;

/// File extension scanned for Terraform configuration.
pub const TF_EXTENSION: &str = "tf";

/// One entity declaration extracted from a file, before registration.
#[derive(Debug, Clone)]
pub struct ParsedEntity {
    /// Which of the five kinds the declaring block maps to
    pub kind: EntityKind,
    /// Provider-specific type; empty for variables, outputs, modules
    pub subtype: String,
    /// Declared name
    pub name: String,
    /// Converted block body
    pub config: ConfigValue,
}

/// Trait for parsing HCL content.
///
/// This trait allows for different parsing implementations
/// (e.g., for testing with mock parsers).
pub trait Parser: Send + Sync {
    /// Parse a single file's contents into entity declarations.
    ///
    /// # Errors
    ///
    /// Returns an error if the HCL content is invalid.
    fn parse_content(
        &self,
        content: &str,
        file_path: &std::path::Path,
    ) -> crate::Result<Vec<ParsedEntity>>;
}
