//! Connection configuration
//!
//! Loaded from environment variables:
//! - `DATABASE_URL`: full connection string, wins over the parts below
//! - `DB_HOST` (default `localhost`), `DB_PORT` (default `5432`)
//! - `DB_NAME` (required without `DATABASE_URL`)
//! - `DB_USER`, `DB_PASSWORD`
//! - `DB_MAX_CONNECTIONS` (default `5`)
//!
//! `.env` files are read first, see [`load_dotenv`].

use std::fmt;
use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;
use tracing::{debug, info};

use crate::error::{DbError, Result};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database connection settings
#[derive(Clone, PartialEq)]
pub struct DbConfig {
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DbConfig {
    /// Create config from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| DbError::config(format!("DB_PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(DbError::config(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer: {raw}"
                    )))
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let config = Self {
            database_url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database: get("DB_NAME"),
            user: get("DB_USER"),
            password: get("DB_PASSWORD"),
            max_connections,
        };

        if config.database_url.is_none() && config.database.is_none() {
            return Err(DbError::config("set DATABASE_URL or DB_NAME"));
        }

        Ok(config)
    }

    /// Build driver connect options. `DATABASE_URL` takes precedence.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return url
                .parse::<PgConnectOptions>()
                .map_err(|e| DbError::config(format!("invalid DATABASE_URL: {e}")));
        }

        let mut options = PgConnectOptions::new().host(&self.host).port(self.port);
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.lightbnb/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy never overwrites variables that are already set
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.lightbnb: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found, using environment variables only");
    } else {
        info!(files = loaded_from.len(), "Loaded .env configuration");
    }
}
