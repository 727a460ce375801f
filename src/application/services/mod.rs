//! Business logic services for the application layer.

pub mod listing_service;
pub mod review_service;

pub use listing_service::ListingService;
pub use review_service::ReviewService;
