//! Tests for row transformation.

use csvmap_model::{Column, ConverterConfig, Mapping, PadType, Row, TrimType, cell_value};
use csvmap_transform::{DiagnosticLevel, RunContext, TransformOptions, Transformer, transform};
use insta::assert_snapshot;

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn render(rows: &[Row], columns: &[Column]) -> String {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| cell_value(row, &column.id))
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn customer_columns() -> (Vec<Column>, Vec<Column>) {
    let sources = vec![
        Column::source("last"),
        Column::source("first"),
        Column::source("code"),
        Column::source("joined"),
    ];
    let targets = vec![
        Column::new("target_name", "氏名"),
        Column::new("target_code", "コード"),
        Column::new("target_kind", "区分"),
        Column::new("target_joined", "入会日"),
    ];
    (sources, targets)
}

#[test]
fn later_mapping_wins_for_shared_target() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("m1", "target_code").with_source("source_code"),
        Mapping::new("m2", "target_code")
            .with_source("source_last")
            .with_converters(vec![ConverterConfig::fixed_prefix("X-")]),
    ];
    let rows = vec![row(&[("source_code", "7"), ("source_last", "山田")])];

    let output = transform(&rows, &mappings, &sources, &targets);
    assert_eq!(cell_value(&output[0], "target_code"), "X-山田");
}

#[test]
fn empty_sources_continue_from_written_target() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("m1", "target_code").with_source("source_code"),
        Mapping::new("m2", "target_code")
            .with_converters(vec![ConverterConfig::padding(PadType::Start, "0", 6)]),
    ];
    let rows = vec![row(&[("source_code", "42")])];

    let output = transform(&rows, &mappings, &sources, &targets);
    assert_eq!(cell_value(&output[0], "target_code"), "000042");
}

#[test]
fn sourceless_trim_cleans_previous_mapping_output() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("m1", "target_name")
            .with_source("source_last")
            .with_converters(vec![
                ConverterConfig::fixed_prefix("  "),
                ConverterConfig::suffix("  "),
            ]),
        Mapping::new("m2", "target_name")
            .with_converters(vec![ConverterConfig::trim(TrimType::Both)]),
    ];
    let rows = vec![row(&[("source_last", "山田")])];

    let output = transform(&rows, &mappings, &sources, &targets);
    assert_eq!(cell_value(&output[0], "target_name"), "山田");
}

#[test]
fn reused_context_draws_new_random_prefixes() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("m1", "target_code")
            .with_source("source_code")
            .with_converters(vec![ConverterConfig::random_prefix(8)]),
    ];
    let rows = vec![row(&[("source_code", "1")]), row(&[("source_code", "2")])];
    let transformer = Transformer::new(&sources, &targets, &mappings);
    let mut context = RunContext::new().with_seed(11);

    let first = transformer.run_with_context(&rows, &mut context);
    let second = transformer.run_with_context(&rows, &mut context);

    assert_ne!(first.rows, second.rows);
    for output in [&first.rows, &second.rows] {
        assert!(cell_value(&output[0], "target_code").ends_with('1'));
        assert_eq!(cell_value(&output[0], "target_code").chars().count(), 9);
    }
}

#[test]
fn empty_sources_on_untouched_target_start_empty() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("m1", "target_kind").with_converters(vec![ConverterConfig::suffix("固定")]),
    ];
    let rows = vec![row(&[("source_code", "42")])];

    let output = transform(&rows, &mappings, &sources, &targets);
    assert_eq!(cell_value(&output[0], "target_kind"), "固定");
}

#[test]
fn full_customer_batch() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("name", "target_name")
            .with_sources(["source_last", "source_first"])
            .with_separator(" ")
            .with_converters(vec![ConverterConfig::trim(TrimType::Both)]),
        Mapping::new("code", "target_code")
            .with_source("source_code")
            .with_converters(vec![
                ConverterConfig::replace("-", ""),
                ConverterConfig::padding(PadType::Start, "0", 9),
            ]),
        Mapping::new("kind", "target_kind")
            .with_source("source_code")
            .with_converters(vec![ConverterConfig::conditional(
                "source_code",
                r"^C",
                "法人",
                Some("個人".to_string()),
            )]),
        Mapping::new("joined", "target_joined")
            .with_source("source_joined")
            .with_converters(vec![ConverterConfig::date_format(
                "YYYY年MM月DD日",
                "YYYY-MM-DD",
                0,
            )]),
    ];
    let rows = vec![
        row(&[
            ("source_last", "山田"),
            ("source_first", "太郎"),
            ("source_code", "C-1234"),
            ("source_joined", "2024年1月5日"),
        ]),
        row(&[
            ("source_last", "鈴木"),
            ("source_first", ""),
            ("source_code", "P-99"),
            ("source_joined", "不明"),
        ]),
    ];

    let output = transform(&rows, &mappings, &sources, &targets);
    assert_snapshot!(render(&output, &targets), @r"
    山田 太郎|0000C1234|法人|2024-01-05
    鈴木|000000P99|個人|不明
    ");
}

#[test]
fn diagnostics_distinguish_degraded_values() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("joined", "target_joined")
            .with_source("source_joined")
            .with_converters(vec![ConverterConfig::date_format("YYYY/MM/DD", "YYYYMMDD", 0)]),
    ];
    let rows = vec![
        row(&[("source_joined", "2024/02/03")]),
        row(&[("source_joined", "someday")]),
    ];

    let result = Transformer::new(&sources, &targets, &mappings)
        .with_options(TransformOptions::new().with_diagnostics())
        .run(&rows);

    assert_eq!(cell_value(&result.rows[0], "target_joined"), "20240203");
    assert_eq!(cell_value(&result.rows[1], "target_joined"), "someday");
    assert_eq!(result.degraded_count(), 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].row, Some(1));
    assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Info);
}

#[test]
fn seeded_runs_are_reproducible() {
    let sources = vec![Column::source("id")];
    let targets = vec![Column::new("target_key", "Key"), Column::new("target_copy", "Copy")];
    let mappings = vec![
        Mapping::new("key", "target_key")
            .with_source("source_id")
            .with_converters(vec![ConverterConfig::random_prefix(8)]),
        Mapping::new("copy", "target_copy")
            .with_source("source_id")
            .with_converters(vec![ConverterConfig::random_prefix(8)]),
    ];
    let rows = vec![row(&[("source_id", "1")]), row(&[("source_id", "2")])];
    let transformer = Transformer::new(&sources, &targets, &mappings)
        .with_options(TransformOptions::new().with_seed(2024));

    let first = transformer.run(&rows);
    let second = transformer.run(&rows);
    assert_eq!(first.rows, second.rows);

    let key = cell_value(&first.rows[0], "target_key");
    let copy = cell_value(&first.rows[0], "target_copy");
    assert_eq!(&key[..8], &copy[..8]);
    assert_ne!(&key[..8], &cell_value(&first.rows[1], "target_key")[..8]);
}

#[test]
fn inputs_are_not_mutated() {
    let (sources, targets) = customer_columns();
    let mappings = vec![
        Mapping::new("m1", "target_code")
            .with_source("source_code")
            .with_converters(vec![ConverterConfig::suffix("!")]),
    ];
    let rows = vec![row(&[("source_code", "1")])];
    let before = rows.clone();

    let _ = transform(&rows, &mappings, &sources, &targets);
    assert_eq!(rows, before);
}
