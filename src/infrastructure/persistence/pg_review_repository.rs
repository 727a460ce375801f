//! PostgreSQL implementation of review repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewReview, Review};
use crate::domain::repositories::ReviewRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
pub(crate) struct ReviewRow {
    id: i64,
    listing_id: i64,
    comment: String,
    rating: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            listing_id: row.listing_id,
            comment: row.comment,
            rating: row.rating,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for reviews.
///
/// A review row carries its listing's id; the listing's ordered review list is
/// derived from it, so attaching or detaching a review is a single statement.
pub struct PgReviewRepository {
    pool: Arc<PgPool>,
}

impl PgReviewRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn add_to_listing(
        &self,
        listing_id: i64,
        new_review: NewReview,
    ) -> Result<Option<Review>, AppError> {
        let result = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (listing_id, comment, rating)
            SELECT $1::BIGINT, $2::TEXT, $3::INTEGER
            WHERE EXISTS (SELECT 1 FROM listings WHERE id = $1)
            RETURNING id, listing_id, comment, rating, created_at
            "#,
        )
        .bind(listing_id)
        .bind(&new_review.comment)
        .bind(new_review.rating)
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.map(Review::from)),
            // The listing was deleted between the existence check and the insert.
            Err(e) if is_foreign_key_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_from_listing(
        &self,
        listing_id: i64,
        review_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND listing_id = $2")
            .bind(review_id)
            .bind(listing_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_listing(&self, listing_id: i64) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, listing_id, comment, rating, created_at
            FROM reviews
            WHERE listing_id = $1
            ORDER BY id
            "#,
        )
        .bind(listing_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}
