//! CLI module
//!
//! Command-line interface for running SQL export pipelines.
//!
//! # Commands
//!
//! - `run` - Register tables, run a folder of SQL files, export each result
//! - `query` - Run one statement and export or preview it
//! - `tables` - List the tables a config registers
//! - `inspect` - Summarize a Parquet file

mod commands;
mod runner;

pub use commands::{parse_table_arg, Cli, Commands, ExportFormat};
pub use runner::Runner;
