//! Schema migration runner for Spendwatch.
//!
//! Connects with the same configuration as the server
//! (`config/default.toml`, `config/$RUN_MODE.toml`, `SPENDWATCH__*`).
//!
//! Usage: `migrator [up|down|status|fresh|refresh|reset]`, default `up`.

use std::str::FromStr;

use anyhow::{Context, bail};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendwatch_db::connect_with;
use spendwatch_db::migration::{Migrator, MigratorTrait};
use spendwatch_shared::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Up,
    /// Rolls back the most recent migration only.
    Down,
    Status,
    Fresh,
    Refresh,
    Reset,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "up" => Self::Up,
            "down" => Self::Down,
            "status" => Self::Status,
            "fresh" => Self::Fresh,
            "refresh" => Self::Refresh,
            "reset" => Self::Reset,
            other => bail!(
                "Unknown command '{other}', expected up, down, status, fresh, refresh, or reset"
            ),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendwatch=info,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Command::Up,
    };

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;

    info!(?command, "Running migrations");
    match command {
        Command::Up => Migrator::up(&db, None).await,
        Command::Down => Migrator::down(&db, Some(1)).await,
        Command::Status => Migrator::status(&db).await,
        Command::Fresh => Migrator::fresh(&db).await,
        Command::Refresh => Migrator::refresh(&db).await,
        Command::Reset => Migrator::reset(&db).await,
    }
    .context("Migration failed")?;

    info!(?command, "Migrations finished");
    Ok(())
}
