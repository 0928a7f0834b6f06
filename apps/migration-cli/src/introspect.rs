//! Reverse-engineer entity definitions from a live database.
//!
//! Walks `information_schema` (or `pragma_table_info` on SQLite), applies
//! the configured identifier casing, and writes one sea-orm entity stub per
//! table into the out directory. The generated sources are a starting point
//! for hand-maintained entities, not a drop-in replacement.

use std::fs;
use std::path::PathBuf;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use thiserror::Error;
use tracing::info;

use crate::casing::IdentifierCasing;
use crate::config::MigrateConfig;

#[derive(Debug, Error)]
pub enum IntrospectError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported database backend")]
    UnsupportedBackend,
}

#[derive(Debug, Clone)]
struct ColumnInfo {
    name: String,
    sql_type: String,
    nullable: bool,
    primary_key: bool,
}

/// Introspect every user table and write entity stubs into `config.out`.
/// Returns the paths written.
pub async fn introspect(
    db: &DatabaseConnection,
    config: &MigrateConfig,
) -> Result<Vec<PathBuf>, IntrospectError> {
    let casing = config.introspect.casing;
    let tables = list_tables(db).await?;
    info!(
        "introspecting {} table(s) with {} casing",
        tables.len(),
        casing.as_str()
    );

    let mut written = Vec::with_capacity(tables.len());
    for table in &tables {
        let columns = table_columns(db, table).await?;
        let source = render_entity(table, &columns, casing);

        let file_name = format!("{}.rs", casing.apply(table));
        let path = config.out.join(file_name);
        fs::write(&path, source).map_err(|source| IntrospectError::Write {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

async fn list_tables(db: &DatabaseConnection) -> Result<Vec<String>, IntrospectError> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DatabaseBackend::Postgres => {
            "SELECT table_name AS name FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
             AND table_name <> 'seaql_migrations' ORDER BY table_name"
        }
        DatabaseBackend::Sqlite => {
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' AND name <> 'seaql_migrations' ORDER BY name"
        }
        _ => return Err(IntrospectError::UnsupportedBackend),
    };

    let rows = db
        .query_all(Statement::from_string(backend, sql.to_string()))
        .await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        tables.push(row.try_get::<String>("", "name")?);
    }
    Ok(tables)
}

async fn table_columns(
    db: &DatabaseConnection,
    table: &str,
) -> Result<Vec<ColumnInfo>, IntrospectError> {
    match db.get_database_backend() {
        DatabaseBackend::Postgres => {
            let pk_rows = db
                .query_all(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    "SELECT kcu.column_name AS name \
                     FROM information_schema.table_constraints tc \
                     JOIN information_schema.key_column_usage kcu \
                       ON tc.constraint_name = kcu.constraint_name \
                     WHERE tc.table_schema = 'public' AND tc.table_name = $1 \
                       AND tc.constraint_type = 'PRIMARY KEY'",
                    [table.into()],
                ))
                .await?;
            let mut pk_columns = Vec::with_capacity(pk_rows.len());
            for row in pk_rows {
                pk_columns.push(row.try_get::<String>("", "name")?);
            }

            let rows = db
                .query_all(Statement::from_sql_and_values(
                    DatabaseBackend::Postgres,
                    "SELECT column_name, data_type, is_nullable \
                     FROM information_schema.columns \
                     WHERE table_schema = 'public' AND table_name = $1 \
                     ORDER BY ordinal_position",
                    [table.into()],
                ))
                .await?;

            let mut columns = Vec::with_capacity(rows.len());
            for row in rows {
                let name = row.try_get::<String>("", "column_name")?;
                let sql_type = row.try_get::<String>("", "data_type")?;
                let nullable = row.try_get::<String>("", "is_nullable")? == "YES";
                let primary_key = pk_columns.contains(&name);
                columns.push(ColumnInfo {
                    name,
                    sql_type,
                    nullable,
                    primary_key,
                });
            }
            Ok(columns)
        }
        DatabaseBackend::Sqlite => {
            let rows = db
                .query_all(Statement::from_string(
                    DatabaseBackend::Sqlite,
                    format!(
                        "SELECT name, type, \"notnull\", pk FROM pragma_table_info('{}')",
                        table
                    ),
                ))
                .await?;

            let mut columns = Vec::with_capacity(rows.len());
            for row in rows {
                let name = row.try_get::<String>("", "name")?;
                let sql_type = row.try_get::<String>("", "type")?;
                let notnull = row.try_get::<i32>("", "notnull")?;
                let pk = row.try_get::<i32>("", "pk")?;
                columns.push(ColumnInfo {
                    name,
                    sql_type,
                    nullable: notnull == 0,
                    primary_key: pk > 0,
                });
            }
            Ok(columns)
        }
        _ => Err(IntrospectError::UnsupportedBackend),
    }
}

fn render_entity(table: &str, columns: &[ColumnInfo], casing: IdentifierCasing) -> String {
    let mut out = String::new();
    out.push_str("//! Generated by `migration introspect`. Review before use.\n\n");
    out.push_str("use sea_orm::entity::prelude::*;\n\n");
    out.push_str("#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]\n");
    out.push_str(&format!("#[sea_orm(table_name = \"{table}\")]\n"));
    out.push_str("pub struct Model {\n");

    for column in columns {
        let field = field_ident(&casing.apply(&column.name));

        let mut attrs: Vec<String> = Vec::new();
        if column.primary_key {
            attrs.push("primary_key".to_string());
        }
        if field != column.name {
            attrs.push(format!("column_name = \"{}\"", column.name));
        }
        if !attrs.is_empty() {
            out.push_str(&format!("    #[sea_orm({})]\n", attrs.join(", ")));
        }

        let rust_type = rust_type_for(&column.sql_type);
        let rust_type = if column.nullable && !column.primary_key {
            format!("Option<{rust_type}>")
        } else {
            rust_type.to_string()
        };
        out.push_str(&format!("    pub {field}: {rust_type},\n"));
    }

    out.push_str("}\n\n");
    out.push_str("#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]\n");
    out.push_str("pub enum Relation {}\n\n");
    out.push_str("impl ActiveModelBehavior for ActiveModel {}\n");
    out
}

/// Map a reported SQL type to the sea-orm prelude type used in entities.
fn rust_type_for(sql_type: &str) -> &'static str {
    let t = sql_type.to_ascii_lowercase();
    if t.contains("smallint") || t == "int2" {
        "i16"
    } else if t.contains("bigint") || t == "int8" {
        "i64"
    } else if t == "integer" || t == "int" || t == "int4" {
        "i32"
    } else if t.contains("numeric") || t.contains("decimal") {
        "Decimal"
    } else if t == "real" || t == "float4" {
        "f32"
    } else if t.contains("double") || t == "float8" {
        "f64"
    } else if t == "boolean" || t == "bool" {
        "bool"
    } else if t == "uuid" {
        "Uuid"
    } else if t.contains("timestamp with time zone") || t == "timestamptz" {
        "DateTimeWithTimeZone"
    } else if t.contains("timestamp") || t.contains("datetime") {
        "DateTime"
    } else if t == "date" {
        "Date"
    } else if t.contains("time") {
        "Time"
    } else if t.contains("json") {
        "Json"
    } else if t == "bytea" || t.contains("blob") {
        "Vec<u8>"
    } else {
        // text, varchar, char and anything exotic
        "String"
    }
}

/// Escape field names that collide with Rust keywords.
fn field_ident(name: &str) -> String {
    const KEYWORDS: &[&str] = &[
        "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else",
        "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait",
        "true", "type", "use", "where", "while",
    ];
    if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::casing::IdentifierCasing;

    use super::{field_ident, render_entity, rust_type_for, ColumnInfo};

    #[test]
    fn maps_common_sql_types() {
        assert_eq!(rust_type_for("bigint"), "i64");
        assert_eq!(rust_type_for("integer"), "i32");
        assert_eq!(rust_type_for("numeric"), "Decimal");
        assert_eq!(rust_type_for("character varying"), "String");
        assert_eq!(rust_type_for("uuid"), "Uuid");
        assert_eq!(rust_type_for("timestamp with time zone"), "DateTimeWithTimeZone");
        assert_eq!(rust_type_for("date"), "Date");
        assert_eq!(rust_type_for("boolean"), "bool");
        assert_eq!(rust_type_for("TEXT"), "String");
        assert_eq!(rust_type_for("INTEGER"), "i32");
    }

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("name"), "name");
    }

    #[test]
    fn renders_entity_with_snake_casing() {
        let columns = vec![
            ColumnInfo {
                name: "id".to_string(),
                sql_type: "uuid".to_string(),
                nullable: false,
                primary_key: true,
            },
            ColumnInfo {
                name: "totalAmount".to_string(),
                sql_type: "numeric".to_string(),
                nullable: false,
                primary_key: false,
            },
            ColumnInfo {
                name: "deleted_at".to_string(),
                sql_type: "timestamp with time zone".to_string(),
                nullable: true,
                primary_key: false,
            },
        ];

        let source = render_entity("invoices", &columns, IdentifierCasing::SnakeCase);
        assert!(source.contains("#[sea_orm(table_name = \"invoices\")]"));
        assert!(source.contains("#[sea_orm(primary_key)]"));
        assert!(source.contains("pub id: Uuid,"));
        // camelCase column gets renamed and keeps a column_name attribute
        assert!(source.contains("#[sea_orm(column_name = \"totalAmount\")]"));
        assert!(source.contains("pub total_amount: Decimal,"));
        assert!(source.contains("pub deleted_at: Option<DateTimeWithTimeZone>,"));
    }

    #[test]
    fn renders_entity_with_camel_casing() {
        let columns = vec![ColumnInfo {
            name: "unit_price".to_string(),
            sql_type: "numeric".to_string(),
            nullable: false,
            primary_key: false,
        }];

        let source = render_entity("invoice_details", &columns, IdentifierCasing::CamelCase);
        assert!(source.contains("#[sea_orm(column_name = \"unit_price\")]"));
        assert!(source.contains("pub unitPrice: Decimal,"));
    }
}
