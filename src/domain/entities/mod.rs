//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Listing`] - A property listing with its ordered review references
//! - [`Review`] - Feedback owned by a single listing
//!
//! Input types are kept separate from stored entities:
//! - [`ListingFields`] - Validated fields for create and update
//! - [`NewReview`] - Validated fields for a new review
//!
//! [`ListingDetails`] is a listing with its reviews resolved.

pub mod listing;
pub mod review;

pub use listing::{IMAGE_FILENAME_PLACEHOLDER, Listing, ListingDetails, ListingFields, ListingImage};
pub use review::{MAX_RATING, MIN_RATING, NewReview, Review};
