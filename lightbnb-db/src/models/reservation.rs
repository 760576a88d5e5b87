//! Reservation listing rows

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::Property;

/// A guest's reservation joined with the reserved property and its rating.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReservationWithProperty {
    #[sqlx(rename = "reservation_id")]
    pub id: i32,
    pub guest_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl ReservationWithProperty {
    pub fn property_id(&self) -> i32 {
        self.property.id
    }

    /// Length of stay in nights.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
