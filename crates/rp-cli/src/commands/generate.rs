//! Generate command implementation

use anyhow::{bail, Context, Result};
use rp_core::{CoreError, MigrationSettings, Settings};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::project_root;

/// Execute the generate command
pub async fn execute(args: &GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => default_dir(global)?,
    };

    let version = chrono::Utc::now().timestamp_millis().to_string();
    let path = write_migration(&dir, &version, &args.name)?;

    println!("Created {}", path.display());
    println!(
        "Register it in {} to include it in the next run.",
        dir.join("mod.rs").display()
    );
    Ok(())
}

/// The configured migration directory, or the built-in default when there
/// is no settings file yet.
fn default_dir(global: &GlobalArgs) -> Result<PathBuf> {
    let root = project_root()?;
    match Settings::load(&global.config) {
        Ok(settings) => Ok(settings.migration_dir_absolute(&root)),
        Err(CoreError::ConfigNotFound { .. }) => {
            Ok(root.join(MigrationSettings::default().directory))
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to load settings from {}", global.config.display())
        }),
    }
}

/// Lowercase `name`, collapsing every run of other characters into `_`.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "migrate".to_string()
    } else {
        slug.to_string()
    }
}

/// `add_building_fields` becomes `AddBuildingFields`.
fn unit_type_name(slug: &str) -> String {
    let mut name: String = slug
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'M');
    }
    name
}

pub(crate) fn file_name(version: &str, slug: &str) -> String {
    format!("m{}_{}.rs", version, slug)
}

/// Source of an empty migration unit for `version`.
pub(crate) fn render_template(version: &str, slug: &str) -> String {
    let type_name = unit_type_name(slug);
    format!(
        r#"//! {slug}

use async_trait::async_trait;
use rp_db::Database;
use rp_migrate::{{MigrateResult, Migration}};

pub(crate) const VERSION: &str = "{version}";

pub(crate) struct {type_name};

#[async_trait]
impl Migration for {type_name} {{
    fn name(&self) -> &str {{
        "{slug}"
    }}

    async fn up(&self, db: &dyn Database, _version: &str) -> MigrateResult<()> {{
        let _ = db;
        Ok(())
    }}
}}
"#
    )
}

/// Write a new migration file into `dir`, never replacing an existing one.
pub(crate) fn write_migration(dir: &Path, version: &str, name: &str) -> Result<PathBuf> {
    let slug = slugify(name);
    let path = dir.join(file_name(version, &slug));
    if path.exists() {
        bail!("Migration file already exists: {}", path.display());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(render_template(version, &slug).as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
