//! Review management service.

use std::sync::Arc;

use crate::application::services::listing_service::LISTING_NOT_FOUND;
use crate::domain::entities::{NewReview, Review};
use crate::domain::repositories::ReviewRepository;
use crate::error::AppError;

/// Message used when a review id does not resolve within its listing.
pub const REVIEW_NOT_FOUND: &str = "Review not found!";

/// Service for attaching reviews to listings and removing them.
pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self { repository }
    }

    /// Adds a review to a listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the listing does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn add_review(
        &self,
        listing_id: i64,
        new_review: NewReview,
    ) -> Result<Review, AppError> {
        let review = self
            .repository
            .add_to_listing(listing_id, new_review)
            .await?
            .ok_or_else(|| AppError::not_found(LISTING_NOT_FOUND))?;

        tracing::info!(listing_id, review_id = review.id, "Review added");
        Ok(review)
    }

    /// Removes a review from a listing and deletes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the review does not exist on that listing.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_review(&self, listing_id: i64, review_id: i64) -> Result<(), AppError> {
        if !self
            .repository
            .remove_from_listing(listing_id, review_id)
            .await?
        {
            return Err(AppError::not_found(REVIEW_NOT_FOUND));
        }

        tracing::info!(listing_id, review_id, "Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockReviewRepository;
    use chrono::Utc;

    fn new_review() -> NewReview {
        NewReview {
            comment: "Great host".to_string(),
            rating: Some(5),
        }
    }

    #[tokio::test]
    async fn test_add_review_success() {
        let mut mock_repo = MockReviewRepository::new();

        mock_repo
            .expect_add_to_listing()
            .withf(|listing_id, review| *listing_id == 2 && review.comment == "Great host")
            .times(1)
            .returning(|listing_id, review| {
                Ok(Some(Review {
                    id: 11,
                    listing_id,
                    comment: review.comment,
                    rating: review.rating,
                    created_at: Utc::now(),
                }))
            });

        let service = ReviewService::new(Arc::new(mock_repo));

        let review = service.add_review(2, new_review()).await.unwrap();
        assert_eq!(review.id, 11);
        assert_eq!(review.listing_id, 2);
    }

    #[tokio::test]
    async fn test_add_review_missing_listing() {
        let mut mock_repo = MockReviewRepository::new();

        mock_repo
            .expect_add_to_listing()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = ReviewService::new(Arc::new(mock_repo));

        let err = service.add_review(2, new_review()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), LISTING_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_review_not_found() {
        let mut mock_repo = MockReviewRepository::new();

        mock_repo
            .expect_remove_from_listing()
            .withf(|listing_id, review_id| *listing_id == 1 && *review_id == 99)
            .times(1)
            .returning(|_, _| Ok(false));

        let service = ReviewService::new(Arc::new(mock_repo));

        let err = service.delete_review(1, 99).await.unwrap_err();
        assert_eq!(err.to_string(), REVIEW_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_review_success() {
        let mut mock_repo = MockReviewRepository::new();

        mock_repo
            .expect_remove_from_listing()
            .times(1)
            .returning(|_, _| Ok(true));

        let service = ReviewService::new(Arc::new(mock_repo));

        assert!(service.delete_review(1, 3).await.is_ok());
    }
}
