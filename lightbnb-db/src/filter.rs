//! Property search query builder
//!
//! Turns a sparse [`PropertyFilter`] into one parameterized statement.
//! Predicates are collected as `{expression, value}` pairs and folded into
//! SQL text at the end, so each `$n` placeholder is the parameter count at
//! the moment its value was pushed.
//!
//! Presence policy: `minimum_rating` applies whenever it is set, including
//! `0`. The WHERE filters (city, owner, prices) are skipped when unset or
//! when they hold their zero value.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::models::{to_cents, Limit, ValidationError};

/// Properties joined to their reviews, with the per-property average.
const SELECT_PROPERTIES: &str = "SELECT properties.*, \
     AVG(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Search criteria for `PropertyRepo::list`. Prices are in major units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the city name
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    /// Minimum average review rating
    pub minimum_rating: Option<f64>,
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Float(f64),
}

impl SqlParam {
    /// Bind this value as the next argument of `query`.
    pub fn bind_to<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlParam::Text(v) => query.bind(v.as_str()),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
        }
    }
}

/// One filter condition awaiting its placeholder number.
#[derive(Debug)]
struct Predicate {
    /// Left-hand side and operator, e.g. `properties.owner_id =`
    expr: &'static str,
    value: SqlParam,
}

impl Predicate {
    fn new(expr: &'static str, value: SqlParam) -> Self {
        Self { expr, value }
    }

    /// Push the value and render the condition with its placeholder.
    fn render(self, params: &mut Vec<SqlParam>) -> String {
        params.push(self.value);
        format!("{} ${}", self.expr, params.len())
    }
}

/// WHERE filters treat a zero value like an absent one.
fn nonzero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

impl PropertyFilter {
    /// Reject NaN and infinite bounds, which would otherwise bind as 0 cents
    /// and drop the predicate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bounds = [
            ("minimum_price_per_night", self.minimum_price_per_night),
            ("maximum_price_per_night", self.maximum_price_per_night),
            ("minimum_rating", self.minimum_rating),
        ];
        for (field, value) in bounds {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ValidationError::NotFinite { field });
            }
        }
        Ok(())
    }

    /// Row-level conditions, in binding order.
    fn where_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(city) = nonzero(self.city.as_deref()) {
            predicates.push(Predicate::new(
                "properties.city ILIKE",
                SqlParam::Text(format!("%{}%", city)),
            ));
        }

        if let Some(owner_id) = nonzero(self.owner_id) {
            predicates.push(Predicate::new(
                "properties.owner_id =",
                SqlParam::Int(i64::from(owner_id)),
            ));
        }

        if let Some(min) = nonzero(self.minimum_price_per_night) {
            predicates.push(Predicate::new(
                "properties.cost_per_night >=",
                SqlParam::Int(to_cents(min)),
            ));
        }

        if let Some(max) = nonzero(self.maximum_price_per_night) {
            predicates.push(Predicate::new(
                "properties.cost_per_night <=",
                SqlParam::Int(to_cents(max)),
            ));
        }

        predicates
    }

    /// Post-aggregation condition on the average rating.
    fn having_predicate(&self) -> Option<Predicate> {
        self.minimum_rating.map(|rating| {
            Predicate::new(
                "AVG(property_reviews.rating) >=",
                SqlParam::Float(rating),
            )
        })
    }
}

/// Built statement: SQL text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl PropertyQuery {
    /// Assemble the search statement for `filter`, capped at `limit` rows.
    pub fn build(filter: &PropertyFilter, limit: Limit) -> Self {
        let mut params = Vec::new();
        let mut sql = String::from(SELECT_PROPERTIES);

        let conditions: Vec<String> = filter
            .where_predicates()
            .into_iter()
            .map(|p| p.render(&mut params))
            .collect();

        if conditions.is_empty() {
            sql.push_str(" WHERE TRUE");
        } else {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" GROUP BY properties.id");

        if let Some(having) = filter.having_predicate() {
            sql.push_str(" HAVING ");
            sql.push_str(&having.render(&mut params));
        }

        params.push(SqlParam::Int(limit.as_i64()));
        sql.push_str(&format!(
            " ORDER BY properties.cost_per_night LIMIT ${}",
            params.len()
        ));

        Self { sql, params }
    }

    /// Prepare the statement with every parameter bound, in order.
    pub fn query_as<'q, O>(&'q self) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
    {
        self.params
            .iter()
            .fold(sqlx::query_as::<Postgres, O>(&self.sql), |query, param| {
                param.bind_to(query)
            })
    }
}
