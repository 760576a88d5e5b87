//! Owned data-access handle
//!
//! Holds the pool for callers that prefer one object over passing `&PgPool`
//! to each repository. Cheap to clone; clones share the pool.

use sqlx::PgPool;
use tracing::info;

use crate::config::DbConfig;
use crate::error::Result;
use crate::pool::create_pool;
use crate::repos::{PropertyRepo, ReservationRepo, UserRepo};

/// Data-access object over a shared connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using `config`.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        Ok(Self::new(create_pool(config).await?))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(&self.pool)
    }

    pub fn properties(&self) -> PropertyRepo<'_> {
        PropertyRepo::new(&self.pool)
    }

    pub fn reservations(&self) -> ReservationRepo<'_> {
        ReservationRepo::new(&self.pool)
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
