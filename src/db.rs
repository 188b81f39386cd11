use std::str::FromStr;

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::AppConfig;

/// Opens the connection pool. Connections are checked out per unit of work
/// and returned on drop, so a failed query never poisons a shared handle.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(connect_options(config)?)
        .await
        .context("connect to database")?;
    Ok(db)
}

fn connect_options(config: &AppConfig) -> anyhow::Result<PgConnectOptions> {
    let mut options =
        PgConnectOptions::from_str(&config.database_url).context("parse DATABASE_URL")?;
    if let Some(mode) = config.database_ssl_mode {
        options = options.ssl_mode(mode);
    }
    Ok(options)
}

/// Applies the embedded migrations. Idempotent; runs once at startup.
pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("apply migrations")?;
    tracing::info!("migrations applied");
    Ok(())
}
