use std::fs;

use tempfile::TempDir;

use tourism_ingest::{CsvExtractor, IngestError};

fn write_source(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write source");
    path
}

#[test]
fn merges_extra_commas_into_category_column() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "dataset.csv",
        "grafico,clase,valor\nTipos,Bed and Breakfast, Familiar,10\n",
    );

    let table = CsvExtractor::default().extract(&path).expect("extract");

    assert_eq!(table.headers, vec!["grafico", "clase", "valor"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][1], "Bed and Breakfast,  Familiar");
    assert_eq!(table.rows[0][2], "10");
}

#[test]
fn blank_lines_are_not_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "regiones.csv",
        "region,recuento\nLos Ríos,10\n\n   \nLagos,5\n\t\n",
    );

    let table = CsvExtractor::default().extract(&path).expect("extract");

    assert_eq!(table.height(), 2);
    assert_eq!(table.rows[1], vec!["Lagos", "5"]);
}

#[test]
fn short_rows_are_padded_to_header_width() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "short.csv", "region,recuento,porcentaje\nLagos,5\n");

    let table = CsvExtractor::default().extract(&path).expect("extract");

    assert_eq!(table.rows, vec![vec!["Lagos", "5", ""]]);
}

#[test]
fn missing_source_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.csv");

    let err = CsvExtractor::default().extract(&path).unwrap_err();

    match err {
        IngestError::FileNotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn zero_line_source_is_empty_source() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "empty.csv", "");

    let err = CsvExtractor::default().extract(&path).unwrap_err();

    assert!(matches!(err, IngestError::EmptySource { .. }));
}

#[test]
fn header_only_source_has_no_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "header.csv", "region,recuento");

    let table = CsvExtractor::default().extract(&path).expect("extract");

    assert_eq!(table.headers, vec!["region", "recuento"]);
    assert!(table.is_empty());
}

#[test]
fn invalid_utf8_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.csv");
    fs::write(&path, b"region,recuento\nLos R\xedos,10\n").unwrap();

    let err = CsvExtractor::default().extract(&path).unwrap_err();

    assert!(matches!(err, IngestError::FileRead { .. }));
}
