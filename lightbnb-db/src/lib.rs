//! lightbnb-db: data-access layer for the LightBnB booking app
//!
//! Reads and writes users, properties, and reservations in PostgreSQL.
//! The connection pool is built by the caller and injected; nothing here
//! holds global state.

pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod models;
pub mod pool;
pub mod repos;

pub use config::DbConfig;
pub use database::Database;
pub use error::{DbError, Result};
pub use filter::{PropertyFilter, PropertyQuery, SqlParam};
pub use models::{
    Limit, NewProperty, NewUser, Property, PropertyWithRating, ReservationWithProperty, User,
    ValidationError,
};
pub use pool::create_pool;
pub use repos::{PropertyRepo, ReservationRepo, UserRepo};
