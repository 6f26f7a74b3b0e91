//! Error types for tfblast.
//!
//! This module defines the error hierarchy using `thiserror`. All errors
//! include context and can be propagated with the `?` operator.
//!
//! # Error Categories
//!
//! - **Input errors**: missing directory, no matching files — fatal, the
//!   run aborts before any graph work begins
//! - **Parse errors**: malformed HCL in a single file — recoverable, the
//!   file is skipped with a warning and the scan continues
//! - **Config errors**: invalid configuration files
//! - **Report errors**: export/serialization failures

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(DirectoryNotFound { path: path.to_path_buf() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::TfBlastError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for tfblast operations.
pub type Result<T> = std::result::Result<T, TfBlastError>;

/// The main error type for tfblast.
#[derive(Error, Debug)]
pub enum TfBlastError {
    // =========================================================================
    // I/O and Input Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Input directory does not exist.
    #[error("Terraform directory not found: {path} ({src_path}:{src_line})")]
    DirectoryNotFound {
        /// The missing directory path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Input directory contains no configuration files.
    #[error("No .tf files found in {path} ({src_path}:{src_line})")]
    NoInputFiles {
        /// The directory that was scanned
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // HCL Parsing Errors
    // =========================================================================
    /// HCL parsing error for a single file.
    #[error("Failed to parse HCL in '{file}' \n\t({src_path}:{src_line}): {message}")]
    HclParse {
        /// The file being parsed
        file: PathBuf,
        /// Error message
        message: String,
        /// Line number (if available)
        line: Option<usize>,
        /// Column number (if available)
        column: Option<usize>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Report Errors
    // =========================================================================
    /// Report or graph export generation error.
    #[error("Failed to generate report ({src_path}:{src_line}): {message}")]
    ReportGeneration {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Multiple errors occurred.
    #[error("Multiple errors occurred ({count} total)")]
    Multiple {
        /// Number of errors
        count: usize,
        /// The individual errors
        errors: Vec<TfBlastError>,
    },
}

impl TfBlastError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
            src_path,
            src_line,
        }
    }

    /// Creates an `HclParse` error.
    #[must_use]
    pub fn hcl_parse(
        file: PathBuf,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::HclParse {
            file,
            message,
            line,
            column,
            src_path,
            src_line,
        }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::ConfigParse {
            message,
            source,
            src_path,
            src_line,
        }
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: String, src_path: &'static str, src_line: u32) -> Self {
        Self::Internal {
            message,
            src_path,
            src_line,
        }
    }

    /// Determines if the error is recoverable (i.e. the scan should skip
    /// the offending file and continue with the rest of the run).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::HclParse { .. } | Self::ConfigParse { .. })
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::NoInputFiles { .. } => 14,
            Self::DirectoryNotFound { .. } => 15,
            Self::ConfigParse { .. } => 18,
            Self::Multiple { .. } => 21,
            _ => 1,
        }
    }

    /// Consolidates multiple errors into a single `TfBlastError::Multiple` if there's more than one.
    /// Otherwise, returns the single error or `Ok(())` if no errors.
    pub fn collect(errors: Vec<Self>) -> Result<()> {
        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.into_iter().next().unwrap())
        } else {
            Err(Self::Multiple {
                count: errors.len(),
                errors,
            })
        }
    }
}

impl From<std::io::Error> for TfBlastError {
    fn from(source: std::io::Error) -> Self {
        // Used when a PathBuf is not readily available; prefer
        // TfBlastError::io(path, source, file!(), line!()) when it is.
        Self::Io {
            path: PathBuf::new(),
            source,
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_json::Error> for TfBlastError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization/deserialization error: {}", source),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

/// A utility for collecting multiple errors during parsing.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<TfBlastError>,
}

impl ErrorCollector {
    /// Create a new error collector.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn add(&mut self, error: TfBlastError) {
        self.errors.push(error);
    }

    /// Get the number of collected errors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to a Result, returning Multiple error if there are any errors.
    pub fn into_result(self) -> Result<()> {
        TfBlastError::collect(self.errors)
    }
}
