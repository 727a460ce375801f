//! Repository trait for listing data access.

use crate::domain::entities::{Listing, ListingDetails, ListingFields};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing listings.
///
/// Absent listings are reported as `Ok(None)` / `Ok(false)`; turning that into
/// a not-found error is left to [`crate::application::services::ListingService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgListingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_listing.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Returns every listing, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<Listing>, AppError>;

    /// Finds a listing and resolves its reviews.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ListingDetails))` if found, reviews in list order
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ListingDetails>, AppError>;

    /// Persists a new listing with an empty review list.
    ///
    /// The image, if a URL was submitted, is stored with the placeholder filename.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, fields: ListingFields) -> Result<Listing, AppError>;

    /// Replaces the listing's fields.
    ///
    /// When `fields.image_url` is `None` the stored image is preserved,
    /// otherwise both url and filename are replaced.
    ///
    /// Returns `Ok(None)` if the listing does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, fields: ListingFields) -> Result<Option<Listing>, AppError>;

    /// Deletes a listing together with every review it references.
    ///
    /// Both steps form one unit: on error nothing has been removed and the
    /// call can be retried. Returns `Ok(false)` if the listing does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
