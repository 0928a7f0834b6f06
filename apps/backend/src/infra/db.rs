use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::db_url;
use crate::error::AppError;

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db() -> Result<DatabaseConnection, AppError> {
    let url = db_url()?;

    let mut opt = ConnectOptions::new(&url);
    opt.max_connections((num_cpus::get() * 2) as u32)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(opt).await?;
    Ok(conn)
}

/// Single startup entrypoint: connect, apply pending migrations, seed
/// initial data. Mirrors what the migration CLI does, so a fresh database
/// is usable from the first boot.
pub async fn bootstrap_db() -> Result<DatabaseConnection, AppError> {
    let conn = connect_db().await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(AppError::from)?;
    info!("migrations applied");

    super::seed::seed_initial_data(&conn).await?;

    Ok(conn)
}
