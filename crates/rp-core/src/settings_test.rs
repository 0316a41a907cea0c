use super::*;
use std::io::Write;

#[test]
fn test_parse_minimal_settings() {
    let yaml = r#"
settings:
  database:
    source: ":memory:"
"#;
    let settings = Settings::parse(yaml).unwrap();
    assert_eq!(settings.database().driver, Driver::DuckDb);
    assert_eq!(settings.database().source, ":memory:");
    assert_eq!(settings.migration().ledger_table, "sys_migration");
    assert_eq!(settings.migration().seed_path, "config/sql/data");
    assert_eq!(settings.migration().seed_skip_policy, SeedSkipPolicy::PerRow);
    assert!(!settings.migration().strict_version_width);
}

#[test]
fn test_parse_full_settings() {
    let yaml = r#"
settings:
  database:
    driver: duckdb
    source: ./data/rentpro.duckdb
  migration:
    ledger_table: app_migrations
    seed_path: fixtures/sql
    seed_skip_policy: per_statement
    strict_version_width: true
    directory: src/migrations
"#;
    let settings = Settings::parse(yaml).unwrap();
    let migration = settings.migration();
    assert_eq!(migration.ledger_table, "app_migrations");
    assert_eq!(migration.seed_skip_policy, SeedSkipPolicy::PerStatement);
    assert!(migration.strict_version_width);

    let root = Path::new("/srv/rentpro");
    assert_eq!(
        settings.seed_path_absolute(root),
        PathBuf::from("/srv/rentpro/fixtures/sql")
    );
    assert_eq!(
        settings.migration_dir_absolute(root),
        PathBuf::from("/srv/rentpro/src/migrations")
    );
}

#[test]
fn test_unknown_driver_rejected() {
    let yaml = r#"
settings:
  database:
    driver: mysql
    source: "root:secret@tcp(127.0.0.1:3306)/rentpro"
"#;
    let result = Settings::parse(yaml);
    assert!(matches!(result, Err(CoreError::ConfigParseError { .. })));
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = r#"
settings:
  database:
    source: ":memory:"
  migration:
    ledger: sys_migration
"#;
    assert!(Settings::parse(yaml).is_err());
}

#[test]
fn test_empty_source_rejected() {
    let yaml = r#"
settings:
  database:
    source: "  "
"#;
    let result = Settings::parse(yaml);
    assert!(matches!(result, Err(CoreError::ConfigInvalid { .. })));
}

#[test]
fn test_ledger_table_must_be_identifier() {
    for bad in ["", "1migrations", "sys migration", "sys_migration; DROP TABLE x"] {
        let yaml = format!(
            "settings:\n  database:\n    source: \":memory:\"\n  migration:\n    ledger_table: \"{}\"\n",
            bad
        );
        let result = Settings::parse(&yaml);
        assert!(
            matches!(result, Err(CoreError::ConfigInvalid { .. })),
            "expected '{}' to be rejected",
            bad
        );
    }
}

#[test]
fn test_load_missing_file() {
    let result = Settings::load(Path::new("/nonexistent/settings.yml"));
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "settings:\n  database:\n    driver: duckdb\n    source: rentpro.duckdb"
    )
    .unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.database().source, "rentpro.duckdb");
}

#[test]
fn test_mask_sensitive() {
    assert_eq!(mask_sensitive("short"), "***");
    assert_eq!(mask_sensitive("12345678"), "***");
    assert_eq!(mask_sensitive("./data/rentpro.duckdb"), "./da***ckdb");
}
