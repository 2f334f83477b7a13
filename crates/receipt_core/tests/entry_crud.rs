use receipt_core::db::open_db_in_memory;
use receipt_core::{
    Entry, EntryRepository, EntryService, RepoError, SqliteEntryRepository, UpsertOutcome,
};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let entry = repo.insert_entry("coffee 3.50", 1_700_000_000_000).unwrap();

    let loaded = repo.get_entry(entry.uuid).unwrap().unwrap();
    assert_eq!(loaded.uuid, entry.uuid);
    assert_eq!(loaded.text, "coffee 3.50");
    assert_eq!(loaded.created_at_ms, 1_700_000_000_000);
}

#[test]
fn inserts_assign_unique_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let mut seen = HashSet::new();
    for index in 0..20 {
        let entry = repo.insert_entry("repeat text", index).unwrap();
        assert!(seen.insert(entry.uuid), "id {} was reused", entry.uuid);
    }
    assert_eq!(repo.count_entries().unwrap(), 20);
}

#[test]
fn whitespace_only_text_is_rejected_and_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    for bad in ["", "   ", "\n\t "] {
        let err = repo.insert_entry(bad, 0).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    assert_eq!(repo.count_entries().unwrap(), 0);
    assert!(repo.list_entries().unwrap().is_empty());
}

#[test]
fn delete_removes_entry_and_absent_id_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let keep = repo.insert_entry("keep", 1).unwrap();
    let doomed = repo.insert_entry("drop", 2).unwrap();

    repo.delete_entry(doomed.uuid).unwrap();
    assert!(repo.get_entry(doomed.uuid).unwrap().is_none());

    // Deleting an id that was never stored neither errors nor mutates.
    repo.delete_entry(Uuid::new_v4()).unwrap();
    repo.delete_entry(doomed.uuid).unwrap();

    let remaining = repo.list_entries().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].uuid, keep.uuid);
}

#[test]
fn list_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    // Timestamps deliberately out of order: listing follows insertion, not
    // chronology.
    let first = repo.insert_entry("first", 300).unwrap();
    let second = repo.insert_entry("second", 100).unwrap();
    let third = repo.insert_entry("third", 200).unwrap();

    let listed: Vec<_> = repo
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.uuid)
        .collect();
    assert_eq!(listed, vec![first.uuid, second.uuid, third.uuid]);
}

#[test]
fn upsert_inserts_new_key_and_updates_existing_key_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let id = Uuid::new_v4();
    let original = Entry::with_id(id, "original", 1_000);
    assert_eq!(
        repo.upsert_entry(&original).unwrap(),
        UpsertOutcome::Inserted
    );

    let revised = Entry::with_id(id, "revised", 2_000);
    assert_eq!(repo.upsert_entry(&revised).unwrap(), UpsertOutcome::Updated);

    assert_eq!(repo.count_entries().unwrap(), 1);
    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.text, "revised");
    assert_eq!(loaded.created_at_ms, 2_000);
}

#[test]
fn delete_all_clears_store_and_reports_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    repo.insert_entry("a", 1).unwrap();
    repo.insert_entry("b", 2).unwrap();
    repo.insert_entry("c", 3).unwrap();

    assert_eq!(repo.delete_all_entries().unwrap(), 3);
    assert_eq!(repo.count_entries().unwrap(), 0);
    assert_eq!(repo.delete_all_entries().unwrap(), 0);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::new(&conn));

    let created = service.create_entry("from service").unwrap();
    assert!(created.created_at_ms > 0);

    let ids: HashSet<_> = service
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.uuid)
        .collect();
    assert!(ids.contains(&created.uuid));
    assert_eq!(service.entry_count().unwrap(), 1);

    service.delete_entry(created.uuid).unwrap();
    assert_eq!(service.entry_count().unwrap(), 0);
}

#[test]
fn service_create_rejects_whitespace_only_text() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::new(&conn));

    let err = service.create_entry("   ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(service.entry_count().unwrap(), 0);
}
