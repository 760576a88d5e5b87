//! Domain models
//!
//! Row types decode straight from query results via `sqlx::FromRow`.
//! Input types validate before anything is sent to the database.

pub mod limit;
pub mod money;
pub mod property;
pub mod reservation;
pub mod user;
pub mod validation;

pub use limit::{Limit, DEFAULT_LIMIT};
pub use money::to_cents;
pub use property::{NewProperty, Property, PropertyWithRating};
pub use reservation::ReservationWithProperty;
pub use user::{normalize_email, NewUser, User};
pub use validation::ValidationError;
