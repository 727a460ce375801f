//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`ListingRepository`] - Listing CRUD with cascading delete
//! - [`ReviewRepository`] - Reviews scoped to a parent listing

pub mod listing_repository;
pub mod review_repository;

pub use listing_repository::ListingRepository;
pub use review_repository::ReviewRepository;

#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
