//! Property repository
//!
//! - list: dynamic search built by [`PropertyQuery`]
//! - add: fixed 14-column positional insert

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::{DbError, Result};
use crate::filter::{PropertyFilter, PropertyQuery};
use crate::models::{Limit, NewProperty, Property, PropertyWithRating};

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties, cheapest first, each with its average rating.
    #[instrument(skip(self), err)]
    pub async fn list(
        &self,
        filter: &PropertyFilter,
        limit: Limit,
    ) -> Result<Vec<PropertyWithRating>> {
        filter.validate()?;

        let query = PropertyQuery::build(filter, limit);
        debug!(sql = %query.sql, params = query.params.len(), "searching properties");

        let rows = query
            .query_as::<PropertyWithRating>()
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::query_failed("get_all_properties", e))?;

        debug!(count = rows.len(), "properties listed");
        Ok(rows)
    }

    /// Insert a property and return the stored row, including its new id.
    #[instrument(skip(self, property), fields(owner_id = property.owner_id), err)]
    pub async fn add(&self, property: &NewProperty) -> Result<Property> {
        property.validate()?;

        let created = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id,
                title,
                description,
                thumbnail_photo_url,
                cover_photo_url,
                cost_per_night,
                street,
                city,
                province,
                post_code,
                country,
                parking_spaces,
                number_of_bathrooms,
                number_of_bedrooms
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(property.description.as_deref())
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::query_failed("add_property", e))?;

        debug!(property_id = created.id, "property created");
        Ok(created)
    }
}
