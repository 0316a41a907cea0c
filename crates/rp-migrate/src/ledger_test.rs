use super::*;
use rp_db::DuckDbBackend;

async fn ledger_db() -> (DuckDbBackend, MigrationLedger) {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = MigrationLedger::default();
    ledger.ensure_table(&db).await.unwrap();
    (db, ledger)
}

#[test]
fn test_default_table_matches_settings_default() {
    let settings = rp_core::MigrationSettings::default();
    assert_eq!(MigrationLedger::default().table(), settings.ledger_table);
    assert_eq!(
        crate::SeedLoader::new("").base_dir(),
        std::path::Path::new(&settings.seed_path)
    );
}

#[tokio::test]
async fn test_ensure_table_is_idempotent() {
    let (db, ledger) = ledger_db().await;
    ledger.ensure_table(&db).await.unwrap();

    assert!(db.relation_exists("sys_migration").await.unwrap());
    assert_eq!(
        db.table_columns("sys_migration").await.unwrap(),
        vec!["version", "name", "status", "created_at", "updated_at"]
    );
}

#[tokio::test]
async fn test_record_then_exists() {
    let (db, ledger) = ledger_db().await;
    assert!(!ledger.exists(&db, "1756303600000").await.unwrap());

    ledger
        .record(&db, "1756303600000", "create rental tables", MigrationStatus::Completed)
        .await
        .unwrap();

    assert!(ledger.exists(&db, "1756303600000").await.unwrap());
    assert!(!ledger.exists(&db, "1756303700000").await.unwrap());
}

#[tokio::test]
async fn test_second_record_is_duplicate_key() {
    let (db, ledger) = ledger_db().await;
    ledger
        .record(&db, "100", "first", MigrationStatus::Completed)
        .await
        .unwrap();

    let err = ledger
        .record(&db, "100", "again", MigrationStatus::Completed)
        .await
        .unwrap_err();
    match err {
        MigrateError::Ledger { source, .. } => assert!(source.is_duplicate_key()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ledger.entries(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_entries_ordered_with_status_and_timestamps() {
    let (db, ledger) = ledger_db().await;
    ledger
        .record(&db, "200", "seed widgets", MigrationStatus::Completed)
        .await
        .unwrap();
    ledger
        .record(&db, "100", "create widgets", MigrationStatus::Completed)
        .await
        .unwrap();

    let entries = ledger.entries(&db).await.unwrap();
    let versions: Vec<&str> = entries.iter().map(|e| e.version.as_str()).collect();
    assert_eq!(versions, vec!["100", "200"]);
    assert_eq!(entries[0].name.as_deref(), Some("create widgets"));
    assert_eq!(entries[0].status.as_deref(), Some("completed"));
    assert!(entries[0].created_at.is_some());
    assert!(entries[0].updated_at.is_some());
}

#[tokio::test]
async fn test_versions_with_quotes_are_escaped() {
    let (db, ledger) = ledger_db().await;
    ledger
        .record(&db, "v'1", "it's quoted", MigrationStatus::Completed)
        .await
        .unwrap();
    assert!(ledger.exists(&db, "v'1").await.unwrap());
}

#[tokio::test]
async fn test_status_default_is_completed() {
    let (db, ledger) = ledger_db().await;
    db.execute("INSERT INTO sys_migration (version, name) VALUES ('manual', 'hand written')")
        .await
        .unwrap();

    let entries = ledger.entries(&db).await.unwrap();
    assert_eq!(entries[0].status.as_deref(), Some("completed"));
}

#[tokio::test]
async fn test_lookup_without_table_is_ledger_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = MigrationLedger::new("missing_ledger");
    let err = ledger.exists(&db, "1").await.unwrap_err();
    assert!(matches!(err, MigrateError::Ledger { action: "lookup", .. }));
}

#[test]
fn test_status_strings() {
    assert_eq!(MigrationStatus::Pending.to_string(), "pending");
    assert_eq!(MigrationStatus::Running.as_str(), "running");
    assert_eq!(MigrationStatus::Completed.as_str(), "completed");
    assert_eq!(MigrationStatus::Failed.as_str(), "failed");
}
