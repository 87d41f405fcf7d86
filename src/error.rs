//! Error types for the SQL pipeline
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the SQL pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("The number of paths ({paths}) must match the number of table names ({table_names})")]
    LengthMismatch { paths: usize, table_names: usize },

    #[error("Unsupported file type '{extension}' for file: {path}")]
    UnsupportedFileType { path: String, extension: String },

    #[error("Unsupported export format '{format}': must be one of 'parquet', 'csv', or 'json'")]
    UnsupportedFormat { format: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Engine Errors
    // ============================================================================
    #[error("Engine error: {0}")]
    Engine(#[from] duckdb::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Query from '{}' failed: {source}", .file.display())]
    Query {
        file: PathBuf,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unsupported file type error
    pub fn unsupported_file_type(path: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Create an unsupported export format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Wrap an error raised while processing one SQL file of a batch
    pub fn query(file: impl Into<PathBuf>, source: Error) -> Self {
        Self::Query {
            file: file.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error was raised before any engine work started
    pub fn is_config_error(&self) -> bool {
        match self {
            Error::Config { .. }
            | Error::LengthMismatch { .. }
            | Error::UnsupportedFileType { .. }
            | Error::UnsupportedFormat { .. }
            | Error::YamlParse(_) => true,
            Error::Query { source, .. } => source.is_config_error(),
            _ => false,
        }
    }
}

/// Result type alias for the SQL pipeline
pub type Result<T> = std::result::Result<T, Error>;
