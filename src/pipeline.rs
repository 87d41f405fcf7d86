//! Registrar, runner and exporter bundled around one engine session

use crate::catalog::CatalogRegistrar;
use crate::engine::{QueryResult, Session};
use crate::error::Result;
use crate::output::{ExportReport, ExportTarget, Exporter};
use crate::types::{FileFormat, RegisteredTable};
use std::path::Path;

/// A session plus the bookkeeping needed to register tables, run SQL and
/// export results.
///
/// Dropping the pipeline closes the session and forgets every table.
pub struct Pipeline {
    session: Session,
    registrar: CatalogRegistrar,
    exporter: Exporter,
}

impl Pipeline {
    /// Create a pipeline over a fresh in-memory session
    pub fn new() -> Result<Self> {
        Ok(Self::with_session(Session::open_in_memory()?))
    }

    /// Create a pipeline over an existing session
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            registrar: CatalogRegistrar::new(),
            exporter: Exporter::new(),
        }
    }

    /// Replace the exporter (e.g. to change Parquet compression)
    #[must_use]
    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = exporter;
        self
    }

    /// Register `paths[i]` as `table_names[i]`, detecting formats by extension
    pub fn register_data<P, S>(&mut self, paths: &[P], table_names: &[S]) -> Result<()>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        self.registrar
            .register_data(&self.session, paths, table_names)
    }

    /// Tables registered through this pipeline, in order
    pub fn registered_tables(&self) -> &[RegisteredTable] {
        self.registrar.tables()
    }

    /// Plan a SQL statement against the registered tables
    pub fn run_query(&self, sql: &str) -> Result<QueryResult<'_>> {
        self.session.sql(sql)
    }

    /// Export a result; `file_type` is `parquet`, `csv` or `json`
    pub fn export(
        &self,
        result: QueryResult<'_>,
        file_type: &str,
        target: &ExportTarget,
        with_header: bool,
    ) -> Result<ExportReport> {
        self.exporter.export(result, file_type, target, with_header)
    }

    /// Export a result in an already-parsed format
    pub fn export_as(
        &self,
        result: QueryResult<'_>,
        format: FileFormat,
        target: &ExportTarget,
        with_header: bool,
    ) -> Result<ExportReport> {
        self.exporter.export_as(result, format, target, with_header)
    }

    /// Underlying engine session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Exporter used by `export`
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }
}
