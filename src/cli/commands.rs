//! CLI commands and argument parsing

use crate::types::FileFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Register data files, run a folder of SQL queries and export the results
#[derive(Parser, Debug)]
#[command(name = "sql-pipeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register tables, run every .sql file in a folder and export each result
    Run {
        /// Pipeline definition file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Folder containing .sql files (overrides config)
        #[arg(long)]
        sql_dir: Option<PathBuf>,

        /// Folder to write exports to (overrides config)
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Table to register, as NAME=PATH (repeatable, added after config tables)
        #[arg(short, long = "table", value_name = "NAME=PATH", value_parser = parse_table_arg)]
        tables: Vec<(String, PathBuf)>,

        /// Export format (overrides config)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Omit the CSV header row
        #[arg(long)]
        no_header: bool,
    },

    /// Run a single SQL statement, exporting it or printing a preview
    Query {
        /// Table to register, as NAME=PATH (repeatable)
        #[arg(short, long = "table", value_name = "NAME=PATH", value_parser = parse_table_arg)]
        tables: Vec<(String, PathBuf)>,

        /// SQL statement to run
        #[arg(long)]
        sql: String,

        /// Export destination; without it rows are printed
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (defaults to the output file's extension, then parquet)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Omit the CSV header row
        #[arg(long)]
        no_header: bool,

        /// Rows to print when no output is given
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Register the configured tables and list them with their columns
    Tables {
        /// Pipeline definition file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show row count, row groups and columns of a Parquet file
    Inspect {
        /// Parquet file to inspect
        path: PathBuf,
    },
}

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Parquet file
    Parquet,
    /// CSV file
    Csv,
    /// Newline-delimited JSON
    Json,
}

impl From<ExportFormat> for FileFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Parquet => FileFormat::Parquet,
            ExportFormat::Csv => FileFormat::Csv,
            ExportFormat::Json => FileFormat::Json,
        }
    }
}

/// Parse a `NAME=PATH` table argument
pub fn parse_table_arg(value: &str) -> std::result::Result<(String, PathBuf), String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got '{value}'"))?;

    let name = name.trim();
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got '{value}'"));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}
