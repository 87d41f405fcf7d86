//! Tests for batch module

use super::*;
use crate::error::Error;
use crate::pipeline::Pipeline;
use crate::types::{FileFormat, SqlFileOrder};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use test_case::test_case;

struct Fixture {
    _dir: TempDir,
    sql_dir: PathBuf,
    export_dir: PathBuf,
    pipeline: Pipeline,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let data = dir.path().join("ridership.csv");
    fs::write(
        &data,
        "day,station,riders\n2024-01-01,A,100\n2024-01-01,B,250\n2024-01-02,A,120\n",
    )
    .unwrap();

    let sql_dir = dir.path().join("sql");
    fs::create_dir(&sql_dir).unwrap();
    let export_dir = dir.path().join("exports").join("nested");

    let mut pipeline = Pipeline::new().unwrap();
    pipeline.register_data(&[data], &["ridership"]).unwrap();

    Fixture {
        _dir: dir,
        sql_dir,
        export_dir,
        pipeline,
    }
}

fn write_sql(dir: &Path, name: &str, sql: &str) {
    fs::write(dir.join(name), sql).unwrap();
}

#[test_case(FileFormat::Parquet ; "parquet")]
#[test_case(FileFormat::Csv ; "csv")]
#[test_case(FileFormat::Json ; "json")]
fn test_process_queries_exports_one_file_per_query(format: FileFormat) {
    let fx = fixture();
    write_sql(
        &fx.sql_dir,
        "q1.sql",
        "SELECT station, SUM(riders) AS riders FROM ridership GROUP BY station;",
    );
    write_sql(&fx.sql_dir, "q2.sql", "SELECT * FROM ridership WHERE riders > 110");
    write_sql(&fx.sql_dir, "README.md", "not a query");
    assert!(!fx.export_dir.exists());

    let report = process_queries(
        &fx.pipeline,
        &fx.sql_dir,
        &fx.export_dir,
        format,
        &BatchOptions::default(),
    )
    .unwrap();

    assert!(fx.export_dir.is_dir());
    assert_eq!(report.len(), 2);
    assert!(fx.export_dir.join(format!("q1.{format}")).is_file());
    assert!(fx.export_dir.join(format!("q2.{format}")).is_file());
    assert_eq!(fs::read_dir(&fx.export_dir).unwrap().count(), 2);

    assert_eq!(report.exports[0].sql_file, fx.sql_dir.join("q1.sql"));
    assert_eq!(report.exports[1].export.format, format);
    assert_eq!(report.exports[0].export.rows, 2);
    assert_eq!(report.exports[1].export.rows, 2);
    assert_eq!(report.total_rows(), 4);
}

#[test]
fn test_process_queries_accepts_comment_after_terminator() {
    let fx = fixture();
    write_sql(
        &fx.sql_dir,
        "busy.sql",
        "SELECT station FROM ridership WHERE riders > 110 ORDER BY station; -- note\n",
    );
    write_sql(
        &fx.sql_dir,
        "days.sql",
        "SELECT DISTINCT day FROM ridership;\n/* end of file */\n",
    );

    let report = process_queries(
        &fx.pipeline,
        &fx.sql_dir,
        &fx.export_dir,
        FileFormat::Csv,
        &BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.total_rows(), 4);
    let busy = fs::read_to_string(fx.export_dir.join("busy.csv")).unwrap();
    assert_eq!(busy.lines().collect::<Vec<_>>(), vec!["station", "A", "B"]);
}

#[test]
fn test_process_queries_empty_folder() {
    let fx = fixture();

    let report = process_queries(
        &fx.pipeline,
        &fx.sql_dir,
        &fx.export_dir,
        FileFormat::Csv,
        &BatchOptions::default(),
    )
    .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.total_rows(), 0);
    assert!(fx.export_dir.is_dir());
}

#[test]
fn test_process_queries_stops_at_first_failure() {
    let fx = fixture();
    write_sql(&fx.sql_dir, "a_ok.sql", "SELECT * FROM ridership");
    write_sql(&fx.sql_dir, "b_broken.sql", "SELECT * FROM no_such_table");
    write_sql(&fx.sql_dir, "c_never.sql", "SELECT 1 AS one");

    let err = process_queries(
        &fx.pipeline,
        &fx.sql_dir,
        &fx.export_dir,
        FileFormat::Csv,
        &BatchOptions::default(),
    )
    .unwrap_err();

    match err {
        Error::Query { file, source } => {
            assert_eq!(file, fx.sql_dir.join("b_broken.sql"));
            assert!(matches!(*source, Error::Engine(_)));
        }
        other => panic!("Expected Query error, got {other:?}"),
    }

    // Earlier export stays, later file is never run
    assert!(fx.export_dir.join("a_ok.csv").is_file());
    assert!(!fx.export_dir.join("c_never.csv").exists());
}

#[test]
fn test_process_queries_csv_without_header() {
    let fx = fixture();
    write_sql(
        &fx.sql_dir,
        "stations.sql",
        "SELECT DISTINCT station FROM ridership ORDER BY station",
    );

    let options = BatchOptions {
        with_header: false,
        ..BatchOptions::default()
    };
    process_queries(
        &fx.pipeline,
        &fx.sql_dir,
        &fx.export_dir,
        FileFormat::Csv,
        &options,
    )
    .unwrap();

    let content = fs::read_to_string(fx.export_dir.join("stations.csv")).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_process_queries_missing_sql_dir() {
    let fx = fixture();
    let err = process_queries(
        &fx.pipeline,
        fx.sql_dir.join("absent"),
        &fx.export_dir,
        FileFormat::Json,
        &BatchOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_list_sql_files_sorted() {
    let dir = tempdir().unwrap();
    for name in ["c.sql", "a.sql", "b.sql", "notes.txt", "upper.SQL"] {
        write_sql(dir.path(), name, "SELECT 1");
    }
    fs::create_dir(dir.path().join("nested.sql")).unwrap();

    let files = list_sql_files(dir.path(), SqlFileOrder::Sorted).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.sql", "b.sql", "c.sql"]);
}

#[test]
fn test_list_sql_files_filesystem_order_has_same_members() {
    let dir = tempdir().unwrap();
    for name in ["c.sql", "a.sql", "b.sql"] {
        write_sql(dir.path(), name, "SELECT 1");
    }

    let mut files = list_sql_files(dir.path(), SqlFileOrder::Filesystem).unwrap();
    assert_eq!(files.len(), 3);
    files.sort();
    assert_eq!(files, list_sql_files(dir.path(), SqlFileOrder::Sorted).unwrap());
}
