//! Batch module
//!
//! Runs every `.sql` file of a folder and exports each result.
//!
//! # Overview
//!
//! The batch module provides:
//! - `process_queries` - Query-then-export loop over a folder of SQL files
//! - `list_sql_files` - Folder scan honouring the configured file order
//! - `BatchOptions` / `BatchReport` - Loop settings and per-file outcomes

mod processor;

pub use processor::{list_sql_files, process_queries, BatchOptions, BatchReport, QueryExport};

#[cfg(test)]
mod tests;
