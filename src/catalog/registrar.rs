//! Extension-driven table registration

use crate::engine::Session;
use crate::error::{Error, Result};
use crate::types::{FileFormat, RegisteredTable};
use std::path::Path;

/// Registers data files in a session and remembers what was registered
#[derive(Debug, Default)]
pub struct CatalogRegistrar {
    /// Successful registrations, in order
    tables: Vec<RegisteredTable>,
}

impl CatalogRegistrar {
    /// Create an empty registrar
    pub fn new() -> Self {
        Self::default()
    }

    /// Register each `paths[i]` under `table_names[i]`.
    ///
    /// The format is picked from the path's extension. Lengths are checked
    /// before anything is registered; an unsupported extension stops the loop
    /// and leaves earlier registrations in place.
    pub fn register_data<P, S>(
        &mut self,
        session: &Session,
        paths: &[P],
        table_names: &[S],
    ) -> Result<()>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        if paths.len() != table_names.len() {
            return Err(Error::LengthMismatch {
                paths: paths.len(),
                table_names: table_names.len(),
            });
        }

        for (path, table_name) in paths.iter().zip(table_names) {
            self.register(session, path, table_name.as_ref())?;
        }

        Ok(())
    }

    /// Register a single data file, detecting its format from the extension
    pub fn register(
        &mut self,
        session: &Session,
        path: impl AsRef<Path>,
        table_name: &str,
    ) -> Result<()> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;

        match format {
            FileFormat::Parquet => session.register_parquet(table_name, path)?,
            FileFormat::Csv => session.register_csv(table_name, path)?,
            FileFormat::Json => session.register_json(table_name, path)?,
        }

        tracing::info!(table = table_name, format = %format, "Table registered: {}", path.display());

        self.tables.push(RegisteredTable {
            table_name: table_name.to_string(),
            source_path: path.to_path_buf(),
            format,
        });
        Ok(())
    }

    /// Tables registered so far
    pub fn tables(&self) -> &[RegisteredTable] {
        &self.tables
    }

    /// Names of the tables registered so far, in registration order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.table_name.as_str()).collect()
    }
}
