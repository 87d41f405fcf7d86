//! Output module
//!
//! Handles output path resolution and writing query results to files.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Resolving export paths (explicit path, directory + name, or default)
//! - Exporting query results as Parquet, CSV or JSON
//! - Inspecting the footer of written Parquet files

mod exporter;
mod inspect;
mod path;

pub use exporter::{ExportReport, ExportSpec, ExportTarget, Exporter};
pub use inspect::{inspect_parquet, ParquetColumn, ParquetSummary};
pub use path::construct_path;
