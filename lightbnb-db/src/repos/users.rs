//! User repository
//!
//! Lookups by email or id return `Ok(None)` when no user matches.

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::{DbError, Result};
use crate::models::{normalize_email, NewUser, User};

/// Value bound for an email lookup, or `None` when there is nothing to look up.
pub fn email_lookup_param(email: Option<&str>) -> Option<String> {
    email.map(normalize_email)
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by email, compared lower-cased.
    ///
    /// An absent email resolves to `None` without touching the database.
    #[instrument(skip(self, email), err)]
    pub async fn get_with_email(&self, email: Option<&str>) -> Result<Option<User>> {
        let Some(email) = email_lookup_param(email) else {
            debug!("email lookup without an email");
            return Ok(None);
        };

        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| DbError::query_failed("get_user_with_email", e))
    }

    /// Get a single user by id.
    #[instrument(skip(self), err)]
    pub async fn get_with_id(&self, id: i32) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| DbError::query_failed("get_user_with_id", e))
    }

    /// Insert a user and return the stored row.
    #[instrument(skip(self, user), fields(email = %user.email()), err)]
    pub async fn add(&self, user: &NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, password, email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user.name())
        .bind(user.password())
        .bind(user.email())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::query_failed("add_user", e))?;

        debug!(user_id = created.id, "user created");
        Ok(created)
    }
}
