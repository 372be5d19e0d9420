//! Database administration commands.
//!
//! All three need `DATABASE_URL`; without it the CLI exits with an error
//! instead of silently falling back to the in-memory collections.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use promodesk_core::AppConfig;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check that the database answers
    Ping,
    /// Load fixtures into the database (existing records are overwritten)
    Seed {
        /// Fixtures file; defaults to `PROMODESK_FIXTURES_PATH`, then the built-in set
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = promodesk_db::connect_pool_from_config(config).await?;

    match command {
        DbCommands::Migrate => run_migrate(&pool).await,
        DbCommands::Ping => run_ping(&pool).await,
        DbCommands::Seed { fixtures } => {
            let path = fixtures.as_deref().or(config.fixtures_path.as_deref());
            run_seed(&pool, path).await
        }
    }
}

async fn run_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = promodesk_db::run_migrations(pool).await?;
    tracing::info!(applied, "migrations complete");
    println!("applied {applied} migration(s)");
    Ok(())
}

async fn run_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    promodesk_db::ping(pool).await?;
    println!("database ok");
    Ok(())
}

/// Seed every collection plus the settings document in one transaction.
///
/// # Errors
///
/// Returns an error if the fixtures fail to load or validate, or if any
/// write fails; in that case nothing is committed.
async fn run_seed(pool: &sqlx::PgPool, path: Option<&Path>) -> anyhow::Result<()> {
    let fixtures = promodesk_core::load_fixtures_or_builtin(path)?;
    let source = path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

    let summary = promodesk_db::seed_fixtures(pool, &fixtures).await?;
    tracing::info!(
        source = %source,
        records = summary.records,
        settings_created = summary.settings_created,
        "seed complete"
    );
    println!(
        "seeded {} record(s) from {source}; settings document {}",
        summary.records,
        if summary.settings_created {
            "created"
        } else {
            "left unchanged"
        }
    );
    Ok(())
}
