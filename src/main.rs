use std::sync::Arc;

use anyhow::Context;

mod app;
mod config;
mod db;
mod records;
mod state;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "redundancy_guard=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Refuse to start without a usable configuration.
    let config = Arc::new(AppConfig::from_env().context("load configuration")?);

    let db = db::connect(&config).await?;
    db::migrate(&db).await?;

    app::serve(AppState::from_parts(config, db)).await
}
