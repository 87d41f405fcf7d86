//! Tests for catalog module

use super::*;
use crate::engine::Session;
use crate::error::Error;
use crate::types::FileFormat;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_register_data_records_names_in_order() {
    let dir = tempdir().unwrap();
    let stops = write_file(dir.path(), "stops.csv", "stop_id,name\n1,Main St\n2,Elm St\n");
    let events = write_file(dir.path(), "events.JSON", "{\"stop_id\": 1, \"delay\": 4}\n");

    let session = Session::open_in_memory().unwrap();
    let mut registrar = CatalogRegistrar::new();
    registrar
        .register_data(&session, &[stops, events], &["stops", "events"])
        .unwrap();

    assert_eq!(registrar.table_names(), vec!["stops", "events"]);
    assert_eq!(registrar.tables()[0].format, FileFormat::Csv);
    assert_eq!(registrar.tables()[1].format, FileFormat::Json);
    assert!(session.table_exists("stops").unwrap());
    assert!(session.table_exists("events").unwrap());
}

#[test]
fn test_register_data_length_mismatch_registers_nothing() {
    let dir = tempdir().unwrap();
    let stops = write_file(dir.path(), "stops.csv", "stop_id\n1\n");

    let session = Session::open_in_memory().unwrap();
    let mut registrar = CatalogRegistrar::new();
    let err = registrar
        .register_data(&session, &[stops], &["stops", "extra"])
        .unwrap_err();

    assert!(matches!(
        err,
        Error::LengthMismatch {
            paths: 1,
            table_names: 2
        }
    ));
    assert!(err.is_config_error());
    assert!(registrar.tables().is_empty());
    assert!(!session.table_exists("stops").unwrap());
}

#[test]
fn test_register_data_unsupported_extension_keeps_earlier_tables() {
    let dir = tempdir().unwrap();
    let stops = write_file(dir.path(), "stops.csv", "stop_id\n1\n");
    let notes = write_file(dir.path(), "notes.txt", "not a table");
    let routes = write_file(dir.path(), "routes.csv", "route_id\n7\n");

    let session = Session::open_in_memory().unwrap();
    let mut registrar = CatalogRegistrar::new();
    let err = registrar
        .register_data(
            &session,
            &[stops, notes.clone(), routes],
            &["stops", "notes", "routes"],
        )
        .unwrap_err();

    match err {
        Error::UnsupportedFileType { path, extension } => {
            assert_eq!(path, notes.display().to_string());
            assert_eq!(extension, ".txt");
        }
        other => panic!("Expected UnsupportedFileType, got {other:?}"),
    }

    // No rollback: the table before the bad entry stays, the one after is never reached
    assert_eq!(registrar.table_names(), vec!["stops"]);
    assert!(session.table_exists("stops").unwrap());
    assert!(!session.table_exists("routes").unwrap());
}

#[test]
fn test_register_glob_of_parquet_files() {
    let dir = tempdir().unwrap();
    let parts = dir.path().join("parts");
    fs::create_dir(&parts).unwrap();

    let session = Session::open_in_memory().unwrap();
    for (i, file) in ["a.parquet", "b.parquet"].iter().enumerate() {
        session
            .sql(&format!("SELECT {i} AS part"))
            .unwrap()
            .write_parquet(parts.join(file), crate::types::ParquetCompression::Snappy)
            .unwrap();
    }

    let mut registrar = CatalogRegistrar::new();
    registrar
        .register_data(&session, &[parts.join("*.parquet")], &["parts"])
        .unwrap();

    let result = session.sql("SELECT * FROM parts").unwrap();
    assert_eq!(result.count_rows().unwrap(), 2);
}

#[test]
fn test_register_engine_failure_is_not_recorded() {
    let dir = tempdir().unwrap();
    let session = Session::open_in_memory().unwrap();
    let mut registrar = CatalogRegistrar::new();

    let err = registrar
        .register(&session, dir.path().join("absent.csv"), "absent")
        .unwrap_err();
    assert!(matches!(err, Error::Engine(_)));
    assert!(registrar.tables().is_empty());
}
