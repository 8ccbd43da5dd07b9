mod app;
mod auth;
mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod mail;
mod response;
mod server;
mod services;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{AppState, build_router};
use crate::config::Config;
use crate::db::connection::{Database, create_pool, run_migrations};
use crate::db::repositories::{PgAppealStore, PgUserStore};

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // RUST_LOG unset
        tracing_subscriber::EnvFilter::new("info,interior_shop=debug,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    tracing::info!("Starting interior-shop...");

    let config = Config::load()?;
    if !config.is_production() {
        tracing::warn!("Running with development settings");
    }

    let postgres = config.postgres.clone();
    let pool = tokio::task::spawn_blocking(move || {
        let pool = create_pool(&postgres)?;
        run_migrations(&pool)?;
        anyhow::Ok(pool)
    })
    .await
    .context("database setup task failed")??;
    tracing::info!("Database ready");

    let database = Database::new(pool, config.postgres.request_timeout());
    let mailer = mail::from_config(&config.mail).context("cannot configure mailer")?;

    let addr = config.http.bind_addr();
    let grace = config.http.shutdown_timeout();
    let db_grace = config.postgres.shutdown_timeout();

    let state = AppState::new(
        config,
        Arc::new(PgUserStore::new(database.clone())),
        Arc::new(PgAppealStore::new(database.clone())),
        mailer,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!("🚀 Server running at http://{}", addr);

    server::serve(listener, app, grace).await?;

    database.close(db_grace).await;
    tracing::info!("Bye");
    Ok(())
}
