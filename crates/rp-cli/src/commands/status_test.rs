use super::*;
use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{MigrateResult, Migration};
use std::sync::Arc;

struct Named(&'static str);

#[async_trait]
impl Migration for Named {
    fn name(&self) -> &str {
        self.0
    }

    async fn up(&self, _db: &dyn Database, _version: &str) -> MigrateResult<()> {
        Ok(())
    }
}

fn entry(version: &str) -> LedgerEntry {
    LedgerEntry {
        version: version.to_string(),
        name: Some("recorded".to_string()),
        status: Some("completed".to_string()),
        created_at: Some("2025-08-27 14:01:12".to_string()),
        updated_at: None,
    }
}

#[test]
fn test_status_rows_mark_applied_and_pending() {
    let units: Vec<(String, Arc<dyn Migration>)> = vec![
        ("1756303272770".to_string(), Arc::new(Named("system tables"))),
        ("1756303350000".to_string(), Arc::new(Named("building timestamps"))),
    ];
    let entries: HashMap<String, LedgerEntry> =
        [("1756303272770".to_string(), entry("1756303272770"))]
            .into_iter()
            .collect();

    let rows = status_rows(&units, &entries);
    assert_eq!(
        rows,
        vec![
            vec![
                "1756303272770".to_string(),
                "system tables".to_string(),
                "applied".to_string(),
                "2025-08-27 14:01:12".to_string(),
            ],
            vec![
                "1756303350000".to_string(),
                "building timestamps".to_string(),
                "pending".to_string(),
                "-".to_string(),
            ],
        ]
    );
}

#[test]
fn test_status_rows_ignore_unregistered_entries() {
    let units: Vec<(String, Arc<dyn Migration>)> =
        vec![("2".to_string(), Arc::new(Named("two")))];
    let entries: HashMap<String, LedgerEntry> =
        [("1".to_string(), entry("1"))].into_iter().collect();

    let rows = status_rows(&units, &entries);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "pending");
}
