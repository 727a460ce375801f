//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgListingRepository`] - Listing storage with transactional cascading delete
//! - [`PgReviewRepository`] - Review storage scoped to listings
//! - [`MemoryStore`] - In-process backend implementing both traits

pub mod memory_store;
pub mod pg_listing_repository;
pub mod pg_review_repository;

pub use memory_store::MemoryStore;
pub use pg_listing_repository::PgListingRepository;
pub use pg_review_repository::PgReviewRepository;
