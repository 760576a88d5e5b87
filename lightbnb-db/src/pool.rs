//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created by
//! the caller and passed to repositories; its lifetime is the caller's.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DbConfig;
use crate::error::{DbError, Result};

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns `DbError::Config` for unusable settings and `DbError::Connect`
/// if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    let options = config.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|source| DbError::Connect { source })?;

    info!(
        max_connections = config.max_connections,
        "Connected to PostgreSQL"
    );
    Ok(pool)
}

/// Create a pool that connects on first use.
///
/// Useful when the database may come up after the caller starts.
pub fn create_lazy_pool(config: &DbConfig) -> Result<PgPool> {
    let options = config.connect_options()?;

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(options))
}
