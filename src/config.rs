//! Configuration module for tfblast.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`tfblast.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # tfblast.yaml
//!
//! # Scanning options
//! scan:
//!   exclude_patterns:
//!     - "*_override.tf"
//!   continue_on_error: true
//!
//! # Output options
//! output:
//!   colored: true
//!   verbose: false
//!   pretty: true
//! ```

use crate::error::{Result, TfBlastError};
use serde::{Deserialize, Serialize};

/// Scanning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Patterns to exclude from scanning (glob patterns, matched against
    /// file names).
    pub exclude_patterns: Vec<String>,

    /// Continue scanning even if some files fail to parse.
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            continue_on_error: true,
        }
    }
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            colored: true,
            verbose: false,
            pretty: true,
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Scanning options
    pub scan: ScanOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        // First, expand environment variables
        let expanded = expand_env_vars(content);

        let config: Config =
            serde_yaml::from_str(&expanded).map_err(|e| TfBlastError::ConfigParse {
                message: e.to_string(),
                source: None,
                src_path: file!(),
                src_line: line!(),
            })?;

        tracing::debug!(
            exclude_patterns = config.scan.exclude_patterns.len(),
            continue_on_error = config.scan.continue_on_error,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# tfblast configuration file

# Scanning options
scan:
  # Patterns to exclude from scanning (glob patterns, matched against file names)
  exclude_patterns:
    - "*_override.tf"

  # Continue scanning even if some files fail to parse
  continue_on_error: true

# Output options
output:
  # Use colored output in terminal
  colored: true

  # Enable verbose output
  verbose: false

  # Pretty-print JSON output
  pretty: true
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::ScanArgs) {
        if !args.exclude_patterns.is_empty() {
            self.scan
                .exclude_patterns
                .extend(args.exclude_patterns.iter().cloned());
        }
        if args.fail_fast {
            self.scan.continue_on_error = false;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    // Find all ${VAR} patterns
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    // Find all $VAR patterns (word boundary)
    let re = regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
