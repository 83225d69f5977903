//! Export and import of transformed tables.

use csvmap_ingest::{
    ExportOptions, IngestError, UTF8_BOM, read_csv_path, write_csv_path, write_csv_string,
};
use csvmap_model::{Column, CsvEncoding, Row, cell_value};
use insta::assert_snapshot;
use tempfile::tempdir;

fn targets() -> Vec<Column> {
    vec![
        Column::new("target_1", "氏名"),
        Column::new("target_2", "住所"),
        Column::new("target_3", "備考"),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        Row::from([
            ("target_1".to_string(), "山田 太郎".to_string()),
            ("target_2".to_string(), "東京都, 港区".to_string()),
            ("target_3".to_string(), "say \"hi\"".to_string()),
        ]),
        Row::from([
            ("target_1".to_string(), "鈴木".to_string()),
            ("target_2".to_string(), String::new()),
            ("target_3".to_string(), "line1\nline2".to_string()),
        ]),
    ]
}

#[test]
fn export_quotes_only_where_needed() {
    let text = write_csv_string(&rows(), &targets()).expect("serialize");
    assert_snapshot!(text.replace("\r\n", "\n").trim_end(), @r#"
    氏名,住所,備考
    山田 太郎,"東京都, 港区","say ""hi"""
    鈴木,,"line1
    line2"
    "#);
}

#[test]
fn export_then_import_reproduces_every_value() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out.csv");
    let columns = targets();
    let original = rows();

    write_csv_path(&path, &original, &columns, ExportOptions::default()).expect("write");
    let raw = std::fs::read(&path).expect("read back");
    assert!(raw.starts_with(UTF8_BOM));

    let imported = read_csv_path(&path, Some(CsvEncoding::Utf8)).expect("import");
    assert_eq!(imported.rows.len(), original.len());
    for (exported, reimported) in original.iter().zip(&imported.rows) {
        for column in &columns {
            let source_id = Column::source(column.name.as_str()).id;
            assert_eq!(
                cell_value(reimported, &source_id),
                cell_value(exported, &column.id),
                "column {}",
                column.name
            );
        }
    }
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let error = read_csv_path(&path, None).expect_err("missing file");
    assert!(matches!(error, IngestError::FileRead { .. }));
    assert!(error.to_string().contains("absent.csv"));
}
