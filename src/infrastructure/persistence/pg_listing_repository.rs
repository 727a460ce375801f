//! PostgreSQL implementation of listing repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{
    IMAGE_FILENAME_PLACEHOLDER, Listing, ListingDetails, ListingFields, ListingImage, Review,
};
use crate::domain::repositories::ListingRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::pg_review_repository::ReviewRow;

/// Column list shared by every query returning a listing.
///
/// `review_ids` is the listing's forward reference list, ordered by review id
/// (insertion order).
const LISTING_COLUMNS: &str = r#"
    l.id, l.title, l.description, l.price, l.location, l.country,
    l.image_url, l.image_filename,
    ARRAY(SELECT r.id FROM reviews r WHERE r.listing_id = l.id ORDER BY r.id) AS review_ids,
    l.created_at, l.updated_at
"#;

#[derive(Debug, FromRow)]
struct ListingRow {
    id: i64,
    title: String,
    description: Option<String>,
    price: f64,
    location: String,
    country: String,
    image_url: Option<String>,
    image_filename: Option<String>,
    review_ids: Vec<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        let image = row.image_url.map(|url| ListingImage {
            url,
            filename: row
                .image_filename
                .unwrap_or_else(|| IMAGE_FILENAME_PLACEHOLDER.to_string()),
        });

        Listing {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            location: row.location,
            country: row.country,
            image,
            review_ids: row.review_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for listings.
///
/// Cascading delete of a listing's reviews runs in a single transaction.
pub struct PgListingRepository {
    pool: Arc<PgPool>,
}

impl PgListingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn list(&self) -> Result<Vec<Listing>, AppError> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings l ORDER BY l.id");

        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ListingDetails>, AppError> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings l WHERE l.id = $1");

        // One transaction so the listing and its reviews come from the same snapshot.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let reviews = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, listing_id, comment, rating, created_at
            FROM reviews
            WHERE listing_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut listing = Listing::from(row);
        let reviews: Vec<Review> = reviews.into_iter().map(Review::from).collect();
        listing.review_ids = reviews.iter().map(|r| r.id).collect();

        Ok(Some(ListingDetails { listing, reviews }))
    }

    async fn create(&self, fields: ListingFields) -> Result<Listing, AppError> {
        let image = fields.image();
        let sql = format!(
            r#"
            WITH l AS (
                INSERT INTO listings (title, description, price, location, country, image_url, image_filename)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {LISTING_COLUMNS} FROM l
            "#
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(&fields.title)
            .bind(fields.description())
            .bind(fields.price)
            .bind(&fields.location)
            .bind(&fields.country)
            .bind(image.as_ref().map(|i| i.url.as_str()))
            .bind(image.as_ref().map(|i| i.filename.as_str()))
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, fields: ListingFields) -> Result<Option<Listing>, AppError> {
        let image = fields.image();
        let sql = format!(
            r#"
            WITH l AS (
                UPDATE listings SET
                    title          = $2,
                    description    = CASE WHEN $9::BOOLEAN THEN $3 ELSE description END,
                    price          = $4,
                    location       = $5,
                    country        = $6,
                    image_url      = CASE WHEN $7::TEXT IS NULL THEN image_url ELSE $7 END,
                    image_filename = CASE WHEN $7::TEXT IS NULL THEN image_filename ELSE $8 END,
                    updated_at     = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {LISTING_COLUMNS} FROM l
            "#
        );

        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .bind(&fields.title)
            .bind(fields.description())
            .bind(fields.price)
            .bind(&fields.location)
            .bind(&fields.country)
            .bind(image.as_ref().map(|i| i.url.as_str()))
            .bind(image.as_ref().map(|i| i.filename.as_str()))
            .bind(fields.description.is_some())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Listing::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let reviews = sqlx::query("DELETE FROM reviews WHERE listing_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;

        tracing::info!(
            listing_id = id,
            reviews_removed = reviews.rows_affected(),
            "Listing deleted"
        );

        Ok(true)
    }
}
