use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use super::DbPool;
use super::error::RepositoryError;
use crate::config::PostgresConfig;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Builds the pool and waits up to the connection timeout for a first
/// connection. Blocking: call it from `spawn_blocking`.
pub fn create_pool(config: &PostgresConfig) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(&config.dsn);

    diesel::r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.connection_timeout())
        .build(manager)
        .context("cannot connect to database")
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .context("cannot get a connection to run migrations")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("failed to run migrations: {e}"))?;

    for version in applied {
        tracing::info!(%version, "Applied migration");
    }
    Ok(())
}

/// Pool handle shared by the repositories. Every query runs on the blocking
/// thread pool under the per-request deadline.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    request_timeout: Duration,
}

impl Database {
    pub fn new(pool: DbPool, request_timeout: Duration) -> Self {
        Self {
            pool,
            request_timeout,
        }
    }

    pub async fn run<T, F>(&self, query: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            query(&mut *conn)
        });

        match tokio::time::timeout(self.request_timeout, task).await {
            Ok(joined) => joined?,
            Err(_) => Err(RepositoryError::Timeout(self.request_timeout)),
        }
    }

    /// Drops the pool, closing its idle connections, within `grace`.
    pub async fn close(self, grace: Duration) {
        let pool = self.pool;
        match tokio::time::timeout(grace, tokio::task::spawn_blocking(move || drop(pool))).await {
            Ok(Ok(())) => tracing::info!("Closed database connections"),
            Ok(Err(e)) => tracing::error!(error = %e, "Failed to close database connections"),
            Err(_) => tracing::warn!(?grace, "Database pool did not close in time"),
        }
    }
}
