//! CLI runner - executes commands

use crate::batch::process_queries;
use crate::cli::commands::{Cli, Commands, ExportFormat};
use crate::config::{load_config, PipelineConfig, TableConfig};
use crate::engine::quote_identifier;
use crate::error::{Error, Result};
use crate::output::{inspect_parquet, ExportTarget};
use crate::pipeline::Pipeline;
use crate::types::{FileFormat, ParquetCompression, SqlFileOrder};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                config,
                sql_dir,
                export_dir,
                tables,
                format,
                no_header,
            } => {
                let config = Self::build_run_config(
                    config.as_deref(),
                    sql_dir.as_deref(),
                    export_dir.as_deref(),
                    tables,
                    *format,
                    *no_header,
                )?;
                self.run_batch(&config)
            }
            Commands::Query {
                tables,
                sql,
                output,
                format,
                no_header,
                limit,
            } => self.query(tables, sql, output.as_deref(), *format, *no_header, *limit),
            Commands::Tables { config } => self.tables(config),
            Commands::Inspect { path } => self.inspect(path),
        }
    }

    /// Merge the optional config file with command-line overrides
    fn build_run_config(
        config_path: Option<&Path>,
        sql_dir: Option<&Path>,
        export_dir: Option<&Path>,
        tables: &[(String, PathBuf)],
        format: Option<ExportFormat>,
        no_header: bool,
    ) -> Result<PipelineConfig> {
        let mut config = match config_path {
            Some(path) => load_config(path)?,
            None => PipelineConfig {
                tables: Vec::new(),
                sql_dir: sql_dir
                    .ok_or_else(|| Error::config("--sql-dir is required without --config"))?
                    .to_path_buf(),
                export_dir: export_dir
                    .ok_or_else(|| Error::config("--export-dir is required without --config"))?
                    .to_path_buf(),
                export_format: FileFormat::default(),
                with_header: true,
                compression: ParquetCompression::default(),
                order: SqlFileOrder::default(),
            },
        };

        if let Some(sql_dir) = sql_dir {
            config.sql_dir = sql_dir.to_path_buf();
        }
        if let Some(export_dir) = export_dir {
            config.export_dir = export_dir.to_path_buf();
        }
        if let Some(format) = format {
            config.export_format = format.into();
        }
        if no_header {
            config.with_header = false;
        }
        config
            .tables
            .extend(tables.iter().map(|(name, path)| TableConfig {
                name: name.clone(),
                path: path.clone(),
            }));

        config.validate()?;
        Ok(config)
    }

    /// Build a pipeline and register the config's tables
    fn open_pipeline(config: &PipelineConfig) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new()?.with_exporter(config.exporter());
        tracing::info!("Registering {} data tables", config.tables.len());
        pipeline.register_data(&config.table_paths(), &config.table_names())?;
        Ok(pipeline)
    }

    /// Register tables and process the SQL folder
    fn run_batch(&self, config: &PipelineConfig) -> Result<()> {
        let start = Instant::now();
        let pipeline = Self::open_pipeline(config)?;

        let report = process_queries(
            &pipeline,
            &config.sql_dir,
            &config.export_dir,
            config.export_format,
            &config.batch_options(),
        )?;

        self.output_message(&json!({
            "type": "BATCH",
            "tables": pipeline
                .registered_tables()
                .iter()
                .map(|t| t.table_name.as_str())
                .collect::<Vec<_>>(),
            "exports": report.exports,
            "total_rows": report.total_rows(),
            "duration_ms": start.elapsed().as_millis() as u64
        }));

        Ok(())
    }

    /// Run one statement, exporting it or printing a preview
    fn query(
        &self,
        tables: &[(String, PathBuf)],
        sql: &str,
        output: Option<&Path>,
        format: Option<ExportFormat>,
        no_header: bool,
        limit: usize,
    ) -> Result<()> {
        let mut pipeline = Pipeline::new()?;
        let (names, paths): (Vec<&str>, Vec<&Path>) = tables
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
            .unzip();
        pipeline.register_data(&paths, &names)?;

        let result = pipeline.run_query(sql)?;

        let Some(output) = output else {
            let columns = result.schema()?;
            let rows = result.preview(limit)?;
            self.output_message(&json!({
                "type": "ROWS",
                "columns": columns,
                "rows": rows
            }));
            return Ok(());
        };

        let format = match format {
            Some(format) => format.into(),
            None => FileFormat::from_path(output).unwrap_or_default(),
        };

        let report =
            pipeline.export_as(result, format, &ExportTarget::path(output), !no_header)?;

        self.output_message(&json!({
            "type": "EXPORT",
            "export": report
        }));
        Ok(())
    }

    /// Register configured tables and list them
    fn tables(&self, config_path: &Path) -> Result<()> {
        let config = load_config(config_path)?;
        let pipeline = Self::open_pipeline(&config)?;

        let mut tables: Vec<Value> = Vec::new();
        for table in pipeline.registered_tables() {
            let select = format!("SELECT * FROM {}", quote_identifier(&table.table_name));
            let columns = pipeline.run_query(&select)?.schema()?;
            tables.push(json!({
                "name": table.table_name,
                "path": table.source_path,
                "format": table.format,
                "columns": columns
            }));
        }

        self.output_message(&json!({
            "type": "TABLES",
            "tables": tables
        }));
        Ok(())
    }

    /// Print a Parquet file's footer summary
    fn inspect(&self, path: &Path) -> Result<()> {
        let summary = inspect_parquet(path)?;
        self.output_message(&json!({
            "type": "PARQUET",
            "file": summary
        }));
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        if self.cli.pretty {
            println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
        } else {
            println!("{}", serde_json::to_string(msg).unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_build_run_config_requires_dirs_without_file() {
        let err = Runner::build_run_config(None, None, Some(Path::new("out")), &[], None, false)
            .unwrap_err();
        assert!(err.to_string().contains("--sql-dir"));
    }

    #[test]
    fn test_build_run_config_overrides_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pipeline.yaml");
        fs::write(
            &config_path,
            "tables:\n  - name: a\n    path: a.csv\nsql_dir: sql\nexport_dir: exports\n",
        )
        .unwrap();

        let config = Runner::build_run_config(
            Some(&config_path),
            None,
            Some(Path::new("/elsewhere")),
            &[("b".to_string(), PathBuf::from("b.json"))],
            Some(ExportFormat::Json),
            true,
        )
        .unwrap();

        assert_eq!(config.sql_dir, dir.path().join("sql"));
        assert_eq!(config.export_dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.table_names(), vec!["a", "b"]);
        assert_eq!(config.tables[0].path, dir.path().join("a.csv"));
        assert_eq!(config.export_format, FileFormat::Json);
        assert!(!config.with_header);
    }

    #[test]
    fn test_run_batch_from_flags() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("fares.csv");
        fs::write(&data, "route,fare\nA,2.75\nB,2.90\n").unwrap();
        let sql_dir = dir.path().join("sql");
        fs::create_dir(&sql_dir).unwrap();
        fs::write(sql_dir.join("all_fares.sql"), "SELECT * FROM fares").unwrap();
        let export_dir = dir.path().join("exports");

        let cli = Cli {
            verbose: false,
            pretty: false,
            command: Commands::Run {
                config: None,
                sql_dir: Some(sql_dir),
                export_dir: Some(export_dir.clone()),
                tables: vec![("fares".to_string(), data)],
                format: Some(ExportFormat::Csv),
                no_header: false,
            },
        };

        Runner::new(cli).run().unwrap();
        let content = fs::read_to_string(export_dir.join("all_fares.csv")).unwrap();
        assert_eq!(content.lines().next(), Some("route,fare"));
    }

    #[test]
    fn test_query_to_output_infers_format_from_extension() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("answer.json");

        let cli = Cli {
            verbose: false,
            pretty: false,
            command: Commands::Query {
                tables: vec![],
                sql: "SELECT 42 AS answer".to_string(),
                output: Some(output.clone()),
                format: None,
                no_header: false,
                limit: 20,
            },
        };

        Runner::new(cli).run().unwrap();
        let record: Value =
            serde_json::from_str(fs::read_to_string(&output).unwrap().trim()).unwrap();
        assert_eq!(record, json!({"answer": 42}));
    }
}
