use super::*;
use rp_db::DuckDbBackend;
use rp_migrate::{version_from_filename, MigrateError, MigrationStatus, Migrator};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn seed_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/sql/data")
}

fn application_migrator() -> (Migrator, Arc<DuckDbBackend>) {
    let registry = MigrationRegistry::new();
    register_all(&registry, &SeedLoader::new(seed_dir())).unwrap();
    let db = Arc::new(DuckDbBackend::in_memory().unwrap());
    let mut migrator = Migrator::new(registry).with_strict_version_width(true);
    migrator.set_db(db.clone());
    (migrator, db)
}

#[test]
fn test_module_names_match_versions() {
    let modules = [
        (
            "m1700000000001_create_rental_tables.rs",
            m1700000000001_create_rental_tables::VERSION,
        ),
        (
            "m1756303272770_create_system_tables.rs",
            m1756303272770_create_system_tables::VERSION,
        ),
        (
            "m1756303350000_add_building_timestamps.rs",
            m1756303350000_add_building_timestamps::VERSION,
        ),
        (
            "m1756303400000_seed_rental_data.rs",
            m1756303400000_seed_rental_data::VERSION,
        ),
        (
            "m1756303600000_create_rental_business_tables.rs",
            m1756303600000_create_rental_business_tables::VERSION,
        ),
        (
            "m1756303700000_seed_auth_data.rs",
            m1756303700000_seed_auth_data::VERSION,
        ),
    ];
    for (file, version) in modules {
        assert_eq!(
            version_from_filename(Path::new(file)).as_deref(),
            Some(version),
            "{file}"
        );
    }
}

#[test]
fn test_register_all_once() {
    let registry = MigrationRegistry::new();
    let loader = SeedLoader::new(seed_dir());
    register_all(&registry, &loader).unwrap();
    assert_eq!(registry.len().unwrap(), 6);

    let err = register_all(&registry, &loader).unwrap_err();
    assert!(matches!(err, MigrateError::DuplicateVersion { .. }));
    assert_eq!(registry.len().unwrap(), 6);
}

#[test]
fn test_seed_files_exist() {
    let available = SeedLoader::new(seed_dir()).available_files().unwrap();
    for file in m1756303400000_seed_rental_data::FILES
        .iter()
        .chain(m1756303700000_seed_auth_data::FILES.iter())
    {
        assert!(available.iter().any(|f| f == file), "missing {file}");
    }
}

#[tokio::test]
async fn test_fresh_database_end_to_end() {
    let (migrator, db) = application_migrator();

    let report = migrator.run().await.unwrap();
    assert_eq!(report.applied.len(), 6);
    assert!(report.skipped.is_empty());

    for (table, rows) in [
        ("sys_city", 3),
        ("sys_district", 5),
        ("sys_buildings", 4),
        ("sys_dept", 3),
        ("sys_post", 4),
        ("sys_role", 3),
        ("sys_menu", 6),
        ("sys_user", 2),
        ("sys_role_menu", 9),
        ("sys_agent", 0),
        ("sys_house", 0),
        ("sys_tenant", 0),
        ("sys_rental_record", 0),
    ] {
        let count = db
            .query_count(&format!("SELECT * FROM {table}"))
            .await
            .unwrap();
        assert_eq!(count, rows, "{table}");
    }

    let columns = db.table_columns("sys_buildings").await.unwrap();
    assert!(columns.iter().any(|c| c == "deleted_at"));
    assert_eq!(migrator.ledger().entries(db.as_ref()).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_second_run_applies_nothing() {
    let (migrator, db) = application_migrator();
    migrator.run().await.unwrap();

    let report = migrator.run().await.unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 6);
    assert_eq!(db.query_count("SELECT * FROM sys_user").await.unwrap(), 2);
}

#[tokio::test]
async fn test_seed_units_tolerate_preloaded_rows() {
    let (migrator, db) = application_migrator();

    // Schema applied by hand and one admin row already present
    for version in ["1700000000001", "1756303272770"] {
        let unit = migrator.registry().get(version).unwrap().unwrap();
        unit.up(db.as_ref(), version).await.unwrap();
        migrator.ensure_ledger().await.unwrap();
        migrator
            .ledger()
            .record(
                db.as_ref(),
                version,
                unit.name(),
                MigrationStatus::Completed,
            )
            .await
            .unwrap();
    }
    db.execute("INSERT INTO sys_role (id, name, role_key) VALUES (1, 'admin', 'admin')")
        .await
        .unwrap();

    let report = migrator.execute().await.unwrap();
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.applied.len(), 4);
    assert_eq!(db.query_count("SELECT * FROM sys_role").await.unwrap(), 3);
    let kept = db
        .query_rows("SELECT name FROM sys_role WHERE id = 1")
        .await
        .unwrap();
    assert_eq!(kept, vec![vec![Some("admin".to_string())]]);
}

#[test]
fn test_only_seed_units_run_outside_a_transaction() {
    let registry = MigrationRegistry::new();
    register_all(&registry, &SeedLoader::new(seed_dir())).unwrap();

    let outside: Vec<String> = registry
        .snapshot()
        .unwrap()
        .into_iter()
        .filter(|(_, unit)| !unit.transactional())
        .map(|(version, _)| version)
        .collect();
    assert_eq!(
        outside,
        vec![
            m1756303350000_add_building_timestamps::VERSION,
            m1756303400000_seed_rental_data::VERSION,
            m1756303700000_seed_auth_data::VERSION,
        ]
    );
}

#[tokio::test]
async fn test_rental_business_tables_accept_a_contract() {
    let (migrator, db) = application_migrator();
    migrator.run().await.unwrap();

    db.execute_batch(
        "INSERT INTO sys_agent (id, agent_code, name, phone, job_title) VALUES (1, 'A001', '张三', '13800000000', '高级经纪人');
         INSERT INTO sys_house (id, building_id, agent_id, house_code, floor, room, full_address, house_type, area, rent_price, deposit, title)
           VALUES (1, 1, 1, 'H001', 12, '1201', '望京街10号1201', '2室1厅', 89.50, 6500, 6500, '望京SOHO两居');
         INSERT INTO sys_tenant (id, tenant_code, name, phone) VALUES (1, 'T001', '李四', '13900000000');
         INSERT INTO sys_rental_record (id, tenant_id, house_id, agent_id, contract_code, contract_type, start_date, end_date, rental_days, monthly_rent, deposit, total_amount, payment_cycle)
           VALUES (1, 1, 1, 1, 'C2025001', '租赁', '2025-09-01', '2026-08-31', 365, 6500, 6500, 78000, '月付');",
    )
    .await
    .unwrap();

    let rows = db
        .query_rows("SELECT rental_status, payment_status FROM sys_rental_record")
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![vec![Some("active".to_string()), Some("current".to_string())]]
    );
}
