//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ListingService, ReviewService};
use crate::domain::repositories::{ListingRepository, ReviewRepository};

#[derive(Clone)]
pub struct AppState {
    pub listing_service: Arc<ListingService>,
    pub review_service: Arc<ReviewService>,
}

impl AppState {
    /// Wires the services over the given storage backend.
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            listing_service: Arc::new(ListingService::new(listings)),
            review_service: Arc::new(ReviewService::new(reviews)),
        }
    }
}
