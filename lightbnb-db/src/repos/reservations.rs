//! Reservation repository

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::{DbError, Result};
use crate::models::{Limit, ReservationWithProperty};

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a guest's reservations, earliest first, with each property's
    /// average rating.
    ///
    /// Single query: properties are JOINed and reviews aggregated per
    /// reservation (no N+1).
    #[instrument(skip(self), err)]
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<ReservationWithProperty>> {
        let rows = sqlx::query_as::<_, ReservationWithProperty>(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.guest_id,
                reservations.start_date,
                reservations.end_date,
                properties.*,
                AVG(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.as_i64())
        .fetch_all(self.pool)
        .await
        .map_err(|e| DbError::query_failed("get_all_reservations", e))?;

        debug!(count = rows.len(), "reservations listed");
        Ok(rows)
    }
}
