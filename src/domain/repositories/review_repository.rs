//! Repository trait for review data access.

use crate::domain::entities::{NewReview, Review};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reviews, always scoped to a parent listing.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReviewRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_review.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Creates a review and appends it to the listing's review list.
    ///
    /// Both writes happen together. Returns `Ok(None)` without writing
    /// anything if the listing does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn add_to_listing(
        &self,
        listing_id: i64,
        new_review: NewReview,
    ) -> Result<Option<Review>, AppError>;

    /// Removes a review from the listing's list and deletes the review record.
    ///
    /// Returns `Ok(false)` if the review does not exist or belongs to a
    /// different listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn remove_from_listing(&self, listing_id: i64, review_id: i64)
    -> Result<bool, AppError>;

    /// Lists the reviews whose back-reference points at `listing_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_for_listing(&self, listing_id: i64) -> Result<Vec<Review>, AppError>;
}
