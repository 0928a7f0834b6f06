use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sea_orm::Database;
use tracing::info;

use migration::{migrate, MigrationCommand};

mod casing;
mod config;
mod generate;
mod introspect;

use config::{sanitize_url, MigrateConfig};

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Dashboard AC database migration tool")]
struct Args {
    /// Path to the migration configuration record
    #[arg(short, long, default_value = "migrate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations
    Up,
    /// Roll back the last applied migration
    Down,
    /// Drop everything, then reapply every migration
    Fresh,
    /// Roll back all applied migrations
    Reset,
    /// Roll back everything, then reapply
    Refresh,
    /// Show which migrations have been applied
    Status,
    /// Validate the configuration record without touching the database
    Check,
    /// Scaffold a new migration source file in the out directory
    Generate {
        /// snake_case name for the migration
        name: String,
    },
    /// Generate entity definitions from the live database schema
    Introspect,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let config = match MigrateConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::from(2);
        }
    };

    match run(args.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &MigrateConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Check => {
            config.validate()?;
            info!(
                "✅ configuration OK: dialect={} schema='{}' out='{}' casing={}",
                config.dialect.as_str(),
                config.schema,
                config.out.display(),
                config.introspect.casing.as_str()
            );
            Ok(())
        }
        Command::Generate { name } => {
            let path = generate::generate_migration(config, &name)?;
            info!("✅ created {}", path.display());
            info!("remember to register the new module in packages/migration/src/lib.rs");
            Ok(())
        }
        Command::Introspect => {
            let db = connect(config).await?;
            let written = introspect::introspect(&db, config).await?;
            info!("✅ introspected {} table(s)", written.len());
            Ok(())
        }
        Command::Up => run_migration(config, MigrationCommand::Up).await,
        Command::Down => run_migration(config, MigrationCommand::Down).await,
        Command::Fresh => run_migration(config, MigrationCommand::Fresh).await,
        Command::Reset => run_migration(config, MigrationCommand::Reset).await,
        Command::Refresh => run_migration(config, MigrationCommand::Refresh).await,
        Command::Status => run_migration(config, MigrationCommand::Status).await,
    }
}

async fn run_migration(
    config: &MigrateConfig,
    command: MigrationCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect(config).await?;
    migrate(&db, command).await?;
    Ok(())
}

async fn connect(
    config: &MigrateConfig,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error>> {
    let url = config.connection_url()?;
    info!("connecting to {}", sanitize_url(&url));
    let db = Database::connect(&url).await?;
    Ok(db)
}
