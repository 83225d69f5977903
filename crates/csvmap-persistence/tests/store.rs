//! Profile store round trips against real files.

use csvmap_map::MappingSession;
use csvmap_model::{Column, CsvEncoding, DataFilter, FilterSide, Mapping, ProfileDocument};
use csvmap_persistence::{
    PersistenceError, ProfileStore, read_profile_document, write_profile_document,
};
use tempfile::tempdir;

fn configured_session() -> MappingSession {
    let mut session = MappingSession::new();
    session.set_source_columns(vec![Column::source("code"), Column::source("name")]);
    let target = session.add_target_column("Code").expect("add target");
    session.push_mapping(Mapping::new("", &target).with_source("source_code"));
    session.set_encoding(Some(CsvEncoding::ShiftJis));
    session.set_data_filter(DataFilter::new(FilterSide::Source, "source_code", "^A"));
    session
}

#[test]
fn saved_profiles_survive_reopen() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("profiles.json");

    let mut store = ProfileStore::open(&path).expect("open");
    let session = configured_session();
    let id = store.save_profile("Orders", &session).expect("save profile");
    store.save().expect("save store");

    let reopened = ProfileStore::open(&path).expect("reopen");
    assert_eq!(reopened.current_profile_id(), Some(id.as_str()));
    let profile = reopened.get(&id).expect("profile");
    assert_eq!(profile.name, "Orders");
    assert_eq!(profile.encoding, Some(CsvEncoding::ShiftJis));
    assert_eq!(profile.mappings.len(), 1);
    assert!(profile.data_filter.is_some());
    assert_eq!(profile.created_at, profile.updated_at);
}

#[test]
fn loading_profile_replaces_session_and_clears_rows() {
    let dir = tempdir().expect("temp dir");
    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    let id = store
        .save_profile("Orders", &configured_session())
        .expect("save");

    let mut session = MappingSession::new();
    session.set_source_data(vec![Default::default()]);
    store.load_profile(&id, &mut session).expect("load");

    assert!(session.source_data().is_empty());
    assert_eq!(session.target_columns().len(), 1);
    assert_eq!(session.encoding(), Some(CsvEncoding::ShiftJis));
    assert_eq!(session.data_filter().pattern, "^A");
}

#[test]
fn update_current_profile_keeps_name_and_id() {
    let dir = tempdir().expect("temp dir");
    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    let mut session = configured_session();
    let id = store.save_profile("Orders", &session).expect("save");

    session.add_target_column("Name").expect("add");
    store.update_current_profile(&session).expect("update");

    let profile = store.get(&id).expect("profile");
    assert_eq!(profile.name, "Orders");
    assert_eq!(profile.target_columns.len(), 2);
    assert!(profile.updated_at >= profile.created_at);
}

#[test]
fn update_without_current_profile_fails() {
    let dir = tempdir().expect("temp dir");
    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    assert!(matches!(
        store.update_current_profile(&MappingSession::new()),
        Err(PersistenceError::NoCurrentProfile)
    ));
}

#[test]
fn import_with_overwrite_replaces_same_name() {
    let dir = tempdir().expect("temp dir");
    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    let first = store
        .save_profile("Orders", &configured_session())
        .expect("save");
    let document = store.export_profile(&first).expect("export");

    let kept = store
        .import_profile(document.clone(), false)
        .expect("import alongside");
    assert_eq!(store.profiles().len(), 2);
    assert_ne!(kept, first);

    let replaced = store.import_profile(document, true).expect("overwrite");
    assert_eq!(store.profiles().len(), 1);
    assert_eq!(store.current_profile_id(), Some(replaced.as_str()));
    assert_eq!(store.find_by_name("Orders").map(|p| p.id.clone()), Some(replaced));
}

#[test]
fn exported_document_reads_back() {
    let dir = tempdir().expect("temp dir");
    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    let id = store
        .save_profile("Orders", &configured_session())
        .expect("save");
    let document = store.export_profile(&id).expect("export");

    let file = dir.path().join("Orders.json");
    write_profile_document(&file, &document).expect("write");
    let text = std::fs::read_to_string(&file).expect("read text");
    assert!(text.contains("\"sourceColumns\""));
    assert!(!text.contains("createdAt"));

    assert_eq!(read_profile_document(&file).expect("read"), document);
}

#[test]
fn invalid_document_is_not_written() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("bad.json");
    let document = ProfileDocument {
        name: "Broken".to_string(),
        mappings: vec![Mapping::new("m", "")],
        ..ProfileDocument::default()
    };

    assert!(matches!(
        write_profile_document(&file, &document),
        Err(PersistenceError::InvalidProfile(_))
    ));
    assert!(!file.exists());
}

#[test]
fn resolve_accepts_id_or_name() {
    let dir = tempdir().expect("temp dir");
    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    let id = store
        .save_profile("Orders", &MappingSession::new())
        .expect("save");

    assert_eq!(store.resolve(&id).map(|p| p.name.as_str()).ok(), Some("Orders"));
    assert_eq!(store.resolve("Orders").map(|p| p.id.as_str()).ok(), Some(id.as_str()));
    let missing = store.resolve("Invoices").expect_err("unknown");
    assert!(missing.suggestion().is_some());
}

#[test]
fn draft_mapping_without_target_saves_and_imports() {
    let dir = tempdir().expect("temp dir");
    let mut session = MappingSession::new();
    let mapping_id = session.add_mapping();

    let mut store = ProfileStore::open(dir.path().join("profiles.json")).expect("open");
    let id = store.save_profile("Draft", &session).expect("save profile");
    let document = store.export_profile(&id).expect("export");
    assert_eq!(document.mappings[0].id, mapping_id);
    assert!(document.mappings[0].target_column_id.is_empty());

    let document_path = dir.path().join("draft.json");
    write_profile_document(&document_path, &document).expect("write document");
    let read_back = read_profile_document(&document_path).expect("read document");
    let imported = store.import_profile(read_back, true).expect("import");
    assert_eq!(store.get(&imported).expect("imported").mappings.len(), 1);
}
