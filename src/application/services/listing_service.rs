//! Listing management service.

use std::sync::Arc;

use crate::domain::entities::{Listing, ListingDetails, ListingFields};
use crate::domain::repositories::ListingRepository;
use crate::error::AppError;

/// Message used whenever a listing id does not resolve.
pub const LISTING_NOT_FOUND: &str = "Listing not found!";

/// Service for creating, reading, updating and deleting listings.
///
/// Converts the repository's "absent" results into [`AppError::NotFound`].
pub struct ListingService {
    repository: Arc<dyn ListingRepository>,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self { repository }
    }

    /// Lists all listings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_listings(&self) -> Result<Vec<Listing>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a listing with its reviews resolved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_listing(&self, id: i64) -> Result<ListingDetails, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(LISTING_NOT_FOUND))
    }

    /// Creates a listing from validated fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_listing(&self, fields: ListingFields) -> Result<Listing, AppError> {
        let listing = self.repository.create(fields).await?;
        tracing::info!(listing_id = listing.id, title = %listing.title, "Listing created");
        Ok(listing)
    }

    /// Updates a listing, keeping its image unless a new URL was submitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update_listing(
        &self,
        id: i64,
        fields: ListingFields,
    ) -> Result<Listing, AppError> {
        let replaces_image = fields.image_url.is_some();

        let listing = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| AppError::not_found(LISTING_NOT_FOUND))?;

        tracing::info!(listing_id = id, replaces_image, "Listing updated");
        Ok(listing)
    }

    /// Deletes a listing and all of its reviews.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    /// Returns [`AppError::Internal`] on storage errors; in that case nothing
    /// was deleted and the call can be retried.
    pub async fn delete_listing(&self, id: i64) -> Result<(), AppError> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(LISTING_NOT_FOUND))
        }
    }
}
