//! Application layer services.
//!
//! Services coordinate repository calls and turn missing records into domain
//! errors, giving HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::listing_service::ListingService`] - Listing CRUD
//! - [`services::review_service::ReviewService`] - Reviews attached to listings

pub mod services;
