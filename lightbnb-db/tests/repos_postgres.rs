//! Repository tests against a real PostgreSQL database.
//!
//! Each test recreates the schema, so they share a lock.
//! Run with: DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored

use lightbnb_db::models::NewProperty;
use lightbnb_db::{Database, DbConfig, DbError, Limit, NewUser, PropertyFilter};
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};

const SCHEMA: &str = include_str!("fixtures/schema.sql");
const SEED: &str = include_str!("fixtures/seed.sql");

static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

async fn seeded_db() -> (Database, MutexGuard<'static, ()>) {
    let guard = DB_LOCK.lock().await;

    let config = DbConfig::from_env().expect("DATABASE_URL or DB_NAME required");
    let db = Database::connect(&config).await.expect("connect failed");

    sqlx::raw_sql(SCHEMA)
        .execute(db.pool())
        .await
        .expect("schema failed");
    sqlx::raw_sql(SEED)
        .execute(db.pool())
        .await
        .expect("seed failed");

    (db, guard)
}

fn ids<T>(rows: &[T], id: impl Fn(&T) -> i32) -> Vec<i32> {
    rows.iter().map(id).collect()
}

#[tokio::test]
#[ignore = "requires database"]
async fn email_lookup_is_case_insensitive() {
    let (db, _guard) = seeded_db().await;

    let user = db
        .users()
        .get_with_email(Some("EVA@Example.com"))
        .await
        .unwrap()
        .expect("user found");
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Eva Stanley");

    let missing = db.users().get_with_email(None).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn email_lookup_ignores_surrounding_whitespace() {
    let (db, _guard) = seeded_db().await;

    let user = db
        .users()
        .get_with_email(Some(" eva@example.com "))
        .await
        .unwrap()
        .expect("user found");
    assert_eq!(user.id, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn id_lookup_returns_none_when_missing() {
    let (db, _guard) = seeded_db().await;

    let user = db.users().get_with_id(2).await.unwrap().expect("user found");
    assert_eq!(user.email, "louisa@example.com");

    assert!(db.users().get_with_id(999).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn add_user_then_find_by_mixed_case_email() {
    let (db, _guard) = seeded_db().await;

    let new_user = NewUser::new("Kit", "Kit@Example.com", "$2a$10$hash").unwrap();
    let created = db.users().add(&new_user).await.unwrap();
    assert_eq!(created.email, "kit@example.com");

    let found = db
        .users()
        .get_with_email(Some("KIT@example.COM"))
        .await
        .unwrap()
        .expect("user found");
    assert_eq!(found.id, created.id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_query_failure() {
    let (db, _guard) = seeded_db().await;

    let dup = NewUser::new("Eve", "eva@example.com", "$2a$10$hash").unwrap();
    let err = db.users().add(&dup).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::QueryFailed {
            operation: "add_user",
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn unfiltered_listing_orders_by_price() {
    let (db, _guard) = seeded_db().await;

    let rows = db
        .properties()
        .list(&PropertyFilter::default(), Limit::default())
        .await
        .unwrap();

    assert_eq!(ids(&rows, |r| r.property.id), vec![4, 2, 1, 3]);
    assert_eq!(rows[0].average_rating, None);
    assert_eq!(rows[1].average_rating, Some(4.5));
    assert_eq!(rows[2].average_rating, Some(3.5));
}

#[tokio::test]
#[ignore = "requires database"]
async fn city_filter_matches_substring() {
    let (db, _guard) = seeded_db().await;

    let filter = PropertyFilter {
        city: Some("van".into()),
        ..Default::default()
    };
    let rows = db.properties().list(&filter, Limit::default()).await.unwrap();

    assert_eq!(ids(&rows, |r| r.property.id), vec![2, 3]);
    assert!(rows.iter().all(|r| r.property.city.contains("Vancouver")));
}

#[tokio::test]
#[ignore = "requires database"]
async fn owner_price_and_rating_filters_combine() {
    let (db, _guard) = seeded_db().await;

    let filter = PropertyFilter {
        owner_id: Some(3),
        maximum_price_per_night: Some(200.0),
        minimum_rating: Some(4.0),
        ..Default::default()
    };
    let rows = db.properties().list(&filter, Limit::new(5)).await.unwrap();

    assert_eq!(ids(&rows, |r| r.property.id), vec![2]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn minimum_price_compares_in_cents() {
    let (db, _guard) = seeded_db().await;

    let filter = PropertyFilter {
        minimum_price_per_night: Some(90.0),
        ..Default::default()
    };
    let rows = db.properties().list(&filter, Limit::default()).await.unwrap();

    assert_eq!(ids(&rows, |r| r.property.id), vec![1, 3]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn nan_minimum_price_is_rejected_not_ignored() {
    let (db, _guard) = seeded_db().await;

    let filter = PropertyFilter {
        minimum_price_per_night: Some(f64::NAN),
        ..Default::default()
    };
    let err = db
        .properties()
        .list(&filter, Limit::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Validation(_)), "{:?}", err);
}

#[tokio::test]
#[ignore = "requires database"]
async fn zero_rating_excludes_unreviewed() {
    let (db, _guard) = seeded_db().await;

    let filter = PropertyFilter {
        minimum_rating: Some(0.0),
        ..Default::default()
    };
    let rows = db.properties().list(&filter, Limit::default()).await.unwrap();

    assert_eq!(ids(&rows, |r| r.property.id), vec![2, 1, 3]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn listing_respects_limit() {
    let (db, _guard) = seeded_db().await;

    let rows = db
        .properties()
        .list(&PropertyFilter::default(), Limit::new(2))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn add_property_returns_submitted_fields() {
    let (db, _guard) = seeded_db().await;

    let new_property = NewProperty {
        owner_id: 2,
        title: "Lakeside cottage".into(),
        description: Some("Quiet, close to the water".into()),
        thumbnail_photo_url: "https://img/5t.jpg".into(),
        cover_photo_url: "https://img/5c.jpg".into(),
        cost_per_night: 12_500,
        street: "1 Shore Rd".into(),
        city: "Kelowna".into(),
        province: "British Columbia".into(),
        post_code: "V1Y".into(),
        country: "Canada".into(),
        parking_spaces: 2,
        number_of_bathrooms: 1,
        number_of_bedrooms: 3,
    };

    let created = db.properties().add(&new_property).await.unwrap();

    assert_eq!(created.id, 5);
    assert!(created.active);
    assert_eq!(created.owner_id, new_property.owner_id);
    assert_eq!(created.title, new_property.title);
    assert_eq!(created.description, new_property.description);
    assert_eq!(created.thumbnail_photo_url, new_property.thumbnail_photo_url);
    assert_eq!(created.cover_photo_url, new_property.cover_photo_url);
    assert_eq!(created.cost_per_night, new_property.cost_per_night);
    assert_eq!(created.street, new_property.street);
    assert_eq!(created.city, new_property.city);
    assert_eq!(created.province, new_property.province);
    assert_eq!(created.post_code, new_property.post_code);
    assert_eq!(created.country, new_property.country);
    assert_eq!(created.parking_spaces, new_property.parking_spaces);
    assert_eq!(created.number_of_bathrooms, new_property.number_of_bathrooms);
    assert_eq!(created.number_of_bedrooms, new_property.number_of_bedrooms);
}

#[tokio::test]
#[ignore = "requires database"]
async fn guest_reservations_by_start_date() {
    let (db, _guard) = seeded_db().await;

    let rows = db
        .reservations()
        .list_for_guest(1, Limit::default())
        .await
        .unwrap();

    assert_eq!(ids(&rows, |r| r.id), vec![2, 1, 4]);
    assert_eq!(ids(&rows, |r| r.property_id()), vec![3, 2, 1]);
    assert_eq!(rows[0].average_rating, Some(4.0));
    assert_eq!(rows[0].nights(), 28);
    assert!(rows.iter().all(|r| r.guest_id == 1));

    let limited = db
        .reservations()
        .list_for_guest(1, Limit::new(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_table_surfaces_query_failure() {
    let (db, _guard) = seeded_db().await;

    sqlx::raw_sql("DROP TABLE property_reviews CASCADE")
        .execute(db.pool())
        .await
        .unwrap();

    let err = db
        .properties()
        .list(&PropertyFilter::default(), Limit::default())
        .await
        .unwrap_err();
    assert!(err.is_query_failure());
    assert!(std::error::Error::source(&err).is_some());
}
