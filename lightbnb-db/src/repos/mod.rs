//! Repository implementations for database access
//!
//! Each repository borrows an injected pool and follows these patterns:
//! - One statement per operation, one round trip
//! - Parameters bound positionally, never interpolated
//! - Driver failures surface as `DbError::QueryFailed`

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;
