//! Parquet footer inspection
//!
//! Reads only the file metadata of an exported Parquet file, which is enough
//! to report row counts and columns without scanning any data pages.

use crate::error::{Error, Result};
use parquet::file::reader::{FileReader, SerializedFileReader};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Summary of a Parquet file's footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParquetSummary {
    pub path: PathBuf,
    pub num_rows: i64,
    pub num_row_groups: usize,
    pub columns: Vec<ParquetColumn>,
    pub created_by: Option<String>,
}

/// One leaf column of a Parquet schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParquetColumn {
    /// Dotted column path
    pub name: String,
    pub physical_type: String,
}

/// Read the footer of a Parquet file
pub fn inspect_parquet(path: impl AsRef<Path>) -> Result<ParquetSummary> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let reader = SerializedFileReader::new(file)?;
    let metadata = reader.metadata();
    let file_metadata = metadata.file_metadata();

    let columns = file_metadata
        .schema_descr()
        .columns()
        .iter()
        .map(|column| ParquetColumn {
            name: column.path().string(),
            physical_type: column.physical_type().to_string(),
        })
        .collect();

    Ok(ParquetSummary {
        path: path.to_path_buf(),
        num_rows: file_metadata.num_rows(),
        num_row_groups: metadata.num_row_groups(),
        columns,
        created_by: file_metadata.created_by().map(String::from),
    })
}
