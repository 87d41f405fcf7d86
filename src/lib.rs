// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # SQL Pipeline
//!
//! Register tabular data files in an embedded DuckDB catalog, run a folder of
//! SQL files against it and export every result set to disk.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sql_pipeline::{process_queries, BatchOptions, FileFormat, Pipeline, Result};
//!
//! fn main() -> Result<()> {
//!     let mut pipeline = Pipeline::new()?;
//!     pipeline.register_data(
//!         &["data/daily_ridership/*.parquet", "data/stations.csv"],
//!         &["daily_ridership", "stations"],
//!     )?;
//!
//!     let report = process_queries(
//!         &pipeline,
//!         "sql",
//!         "data/exports",
//!         FileFormat::Parquet,
//!         &BatchOptions::default(),
//!     )?;
//!     println!("exported {} files", report.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  process_queries(sql_dir, export_dir, format)                │
//! │    for each *.sql: run_query() → export()                    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────────┬────────────────────┐
//! │   Catalog    │   Engine                │   Output           │
//! ├──────────────┼─────────────────────────┼────────────────────┤
//! │ ext sniffing │ Session (DuckDB)        │ construct_path     │
//! │ ledger       │ QueryResult (lazy)      │ Exporter (COPY TO) │
//! │              │                         │ Parquet inspect    │
//! └──────────────┴─────────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pipeline
pub mod error;

/// Common types (file formats, registered tables)
pub mod types;

/// Embedded query engine session
pub mod engine;

/// Extension-driven table registration
pub mod catalog;

/// Output paths, exporters and Parquet inspection
pub mod output;

/// Registrar, runner and exporter aggregate
pub mod pipeline;

/// Folder-of-SQL batch processing
pub mod batch;

/// YAML pipeline configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use batch::{process_queries, BatchOptions, BatchReport};
pub use config::{load_config, PipelineConfig};
pub use engine::{QueryResult, Session};
pub use error::{Error, Result};
pub use output::{construct_path, ExportReport, ExportTarget, Exporter};
pub use pipeline::Pipeline;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
