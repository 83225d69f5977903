//! Tests for csvmap-model serialization.

use csvmap_model::{
    ConverterConfig, ConverterKind, CsvEncoding, DataFilter, FilterSide, Mapping, PrefixType,
    Profile, ProfileDocument, SplitOptions, TrimType,
};

#[test]
fn converter_reads_only_its_own_fields() {
    let json = r#"{"type":"split","delimiter":"-","index":-1,"suffix":"ignored"}"#;
    let config: ConverterConfig = serde_json::from_str(json).expect("parse split");
    assert_eq!(
        config,
        ConverterConfig::Split(SplitOptions {
            delimiter: Some("-".to_string()),
            index: Some(-1),
        })
    );
}

#[test]
fn converter_with_no_fields_uses_defaults() {
    let config: ConverterConfig = serde_json::from_str(r#"{"type":"prefix"}"#).expect("parse");
    let ConverterConfig::Prefix(options) = config else {
        panic!("expected prefix config");
    };
    assert_eq!(options.prefix_type(), PrefixType::Fixed);
    assert_eq!(options.fixed_prefix(), "");
}

#[test]
fn unknown_converter_type_is_preserved_as_unknown() {
    let config: ConverterConfig =
        serde_json::from_str(r#"{"type":"reverse","delimiter":","}"#).expect("parse");
    assert_eq!(config, ConverterConfig::Unknown);
    assert_eq!(config.kind(), None);
}

#[test]
fn converter_serializes_with_camel_case_tag() {
    let config = ConverterConfig::date_format("YYYY/MM/DD", "YYYY-MM-DD", -1);
    let value = serde_json::to_value(&config).expect("serialize");
    assert_eq!(value["type"], "dateFormat");
    assert_eq!(value["dateInputFormat"], "YYYY/MM/DD");
    assert_eq!(value["dateOffsetMonths"], -1);

    let trim = serde_json::to_value(ConverterConfig::trim(TrimType::End)).expect("serialize");
    assert_eq!(trim, serde_json::json!({"type": "trim", "trimType": "end"}));
}

#[test]
fn every_kind_has_a_default_config_of_the_same_kind() {
    for kind in ConverterKind::ALL {
        assert_eq!(kind.default_config().kind(), Some(kind));
    }
}

#[test]
fn legacy_single_source_mapping_is_normalized() {
    let json = r#"{
        "id": "mapping_1",
        "sourceColumnId": "source_name",
        "targetColumnId": "target_1",
        "converters": [{"type": "direct"}]
    }"#;
    let mapping: Mapping = serde_json::from_str(json).expect("parse legacy mapping");
    assert_eq!(mapping.source_column_ids, vec!["source_name"]);

    let value = serde_json::to_value(&mapping).expect("serialize");
    assert!(value.get("sourceColumnId").is_none());
    assert_eq!(value["sourceColumnIds"], serde_json::json!(["source_name"]));
}

#[test]
fn mapping_without_converters_gets_direct_step() {
    let json = r#"{"id": "m", "sourceColumnIds": [], "targetColumnId": "t"}"#;
    let mapping: Mapping = serde_json::from_str(json).expect("parse");
    assert_eq!(mapping.converters, vec![ConverterConfig::Direct]);
    assert!(mapping.source_column_ids.is_empty());
}

#[test]
fn data_filter_uses_column_type_key() {
    let filter = DataFilter::new(FilterSide::Target, "target_1", "^A");
    let value = serde_json::to_value(&filter).expect("serialize");
    assert_eq!(value["columnType"], "target");
    assert_eq!(value["columnId"], "target_1");
    assert!(filter.is_active());
}

#[test]
fn encoding_parses_aliases() {
    assert_eq!("UTF-8".parse::<CsvEncoding>(), Ok(CsvEncoding::Utf8));
    assert_eq!("Shift_JIS".parse::<CsvEncoding>(), Ok(CsvEncoding::ShiftJis));
    assert!("latin1".parse::<CsvEncoding>().is_err());
    assert_eq!(
        serde_json::to_string(&CsvEncoding::ShiftJis).expect("serialize"),
        "\"sjis\""
    );
}

#[test]
fn profile_document_round_trips_through_profile() {
    let json = r#"{
        "name": "Orders",
        "sourceColumns": [{"id": "source_code", "name": "code"}],
        "targetColumns": [{"id": "target_1", "name": "Code"}],
        "mappings": [{
            "id": "m1",
            "sourceColumnIds": ["source_code"],
            "targetColumnId": "target_1",
            "converters": [{"type": "padding", "padLength": 5}]
        }],
        "encoding": "sjis"
    }"#;
    let document: ProfileDocument = serde_json::from_str(json).expect("parse document");
    document.validate().expect("valid document");

    let profile: Profile = document.clone().into_profile("profile_x", 42);
    assert_eq!(profile.encoding, Some(CsvEncoding::ShiftJis));
    assert_eq!(profile.to_document(), document);
}
