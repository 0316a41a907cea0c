use super::*;
use std::thread;

struct Noop(&'static str);

#[async_trait]
impl Migration for Noop {
    fn name(&self) -> &str {
        self.0
    }

    async fn up(&self, _db: &dyn Database, _version: &str) -> MigrateResult<()> {
        Ok(())
    }
}

#[test]
fn test_versions_sort_lexically_not_numerically() {
    let registry = MigrationRegistry::new();
    registry.register("2", Noop("two")).unwrap();
    registry.register("10", Noop("ten")).unwrap();
    registry.register("1", Noop("one")).unwrap();

    assert_eq!(registry.versions().unwrap(), vec!["1", "10", "2"]);
}

#[test]
fn test_duplicate_version_rejected_and_first_kept() {
    let registry = MigrationRegistry::new();
    registry.register("1756303600000", Noop("first")).unwrap();

    let err = registry
        .register("1756303600000", Noop("second"))
        .unwrap_err();
    assert!(matches!(err, MigrateError::DuplicateVersion { ref version } if version == "1756303600000"));

    let kept = registry.get("1756303600000").unwrap().unwrap();
    assert_eq!(kept.name(), "first");
    assert_eq!(registry.len().unwrap(), 1);
}

#[test]
fn test_empty_version_rejected() {
    let registry = MigrationRegistry::new();
    let err = registry.register("  ", Noop("blank")).unwrap_err();
    assert!(matches!(err, MigrateError::InvalidVersion { .. }));
    assert!(registry.is_empty().unwrap());
}

#[test]
fn test_concurrent_registration() {
    let registry = Arc::new(MigrationRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for j in 0..25 {
                    let version = format!("{:013}", i * 100 + j);
                    registry.register(version, Noop("concurrent")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let versions = registry.versions().unwrap();
    assert_eq!(versions.len(), 200);
    let mut sorted = versions.clone();
    sorted.sort();
    assert_eq!(versions, sorted);
}

#[test]
fn test_snapshot_matches_versions() {
    let registry = MigrationRegistry::new();
    registry.register("b", Noop("b")).unwrap();
    registry.register("a", Noop("a")).unwrap();

    let snapshot = registry.snapshot().unwrap();
    let names: Vec<(&str, &str)> = snapshot
        .iter()
        .map(|(v, unit)| (v.as_str(), unit.name()))
        .collect();
    assert_eq!(names, vec![("a", "a"), ("b", "b")]);
}

#[test]
fn test_default_units_are_transactional() {
    assert!(Noop("x").transactional());
}

#[test]
fn test_check_version_width() {
    let same = vec!["1756303600000".to_string(), "1756303700000".to_string()];
    assert!(check_version_width(&same, true).is_ok());

    let mixed = vec!["1".to_string(), "10".to_string(), "2".to_string()];
    assert!(check_version_width(&mixed, false).is_ok());
    assert!(matches!(
        check_version_width(&mixed, true),
        Err(MigrateError::InconsistentVersionWidth { .. })
    ));

    assert!(check_version_width(&[], true).is_ok());
}

#[test]
fn test_version_from_filename() {
    assert_eq!(
        version_from_filename(Path::new("migrations/1756303600000_create_rental_tables.rs")),
        Some("1756303600000".to_string())
    );
    assert_eq!(
        version_from_filename(Path::new("m1756303700000_init_auth_data.rs")),
        Some("1756303700000".to_string())
    );
    assert_eq!(version_from_filename(Path::new("mod.rs")), None);
    assert_eq!(version_from_filename(Path::new("abcdefghijklmnop.rs")), None);
}
