//! Schema Migrator
//!
//! Applies pending SQL migrations to the auth database and reports whether
//! anything changed.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sqlx::migrate::{Migrate, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migrator")]
#[command(version, about = "Apply database migrations for the auth service", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Directory holding the migration files
    #[arg(long, env = "MIGRATIONS_PATH")]
    migrations_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migrator=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if cli.database_url.trim().is_empty() {
        anyhow::bail!("database url is empty");
    }

    let migrator = Migrator::new(cli.migrations_path.as_path())
        .await
        .with_context(|| {
            format!(
                "failed to load migrations from {}",
                cli.migrations_path.display()
            )
        })?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&cli.database_url)
        .await
        .context("failed to connect to database")?;

    let pending = pending_migrations(&migrator, &pool).await?;
    tracing::info!(pending, "Checked migration status");

    if pending == 0 {
        println!("no migrations to apply");
        return Ok(());
    }

    migrator
        .run(&pool)
        .await
        .context("failed to apply migrations")?;

    pool.close().await;
    println!("migrations applied successfully");

    Ok(())
}

/// Number of up migrations not yet recorded in the database
async fn pending_migrations(migrator: &Migrator, pool: &sqlx::PgPool) -> anyhow::Result<usize> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;

    Ok(migrator
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .filter(|m| !applied.iter().any(|a| a.version == m.version))
        .count())
}
