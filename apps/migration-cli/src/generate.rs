//! Scaffolding for new migration source files.

use std::fs;
use std::path::PathBuf;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::config::{ConfigError, MigrateConfig};

const TEMPLATE: &str = r#"use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        todo!()
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        todo!()
    }
}
"#;

/// Write a timestamped migration scaffold into the configured out directory.
/// Returns the path of the new file.
pub fn generate_migration(config: &MigrateConfig, name: &str) -> Result<PathBuf, ConfigError> {
    validate_name(name)?;

    if !config.out.is_dir() {
        return Err(ConfigError::Invalid(format!(
            "out directory '{}' does not exist",
            config.out.display()
        )));
    }

    let stamp = OffsetDateTime::now_utc()
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .map_err(|e| ConfigError::Invalid(format!("failed to format timestamp: {e}")))?;

    let file_name = format!("m{stamp}_{name}.rs");
    let path = config.out.join(&file_name);
    if path.exists() {
        return Err(ConfigError::Invalid(format!(
            "migration file '{}' already exists",
            path.display()
        )));
    }

    fs::write(&path, TEMPLATE).map_err(|e| {
        ConfigError::Invalid(format!("failed to write '{}': {e}", path.display()))
    })?;

    Ok(path)
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !ok {
        return Err(ConfigError::Invalid(format!(
            "migration name '{name}' must be lowercase snake_case (a-z, 0-9, _)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::config::{DbSection, Dialect, IntrospectSection, MigrateConfig};

    use super::generate_migration;

    fn config_with_out(out: PathBuf) -> MigrateConfig {
        MigrateConfig {
            schema: "src/entities/*.rs".to_string(),
            out,
            dialect: Dialect::Postgresql,
            db: DbSection::default(),
            introspect: IntrospectSection::default(),
        }
    }

    #[test]
    fn writes_scaffold_with_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_out(dir.path().to_path_buf());

        let path = generate_migration(&config, "add_notes_column").unwrap();
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with('m'));
        assert!(file_name.ends_with("_add_notes_column.rs"));

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("DeriveMigrationName"));
        assert!(body.contains("MigrationTrait"));
    }

    #[test]
    fn rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_out(dir.path().to_path_buf());

        assert!(generate_migration(&config, "Add Column").is_err());
        assert!(generate_migration(&config, "").is_err());
        assert!(generate_migration(&config, "drop-table").is_err());
    }

    #[test]
    fn rejects_missing_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_out(dir.path().join("nope"));

        assert!(generate_migration(&config, "init").is_err());
    }
}
