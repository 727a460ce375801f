//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Listings, reviews and their input types
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].
//!
//! # Relationship Integrity
//!
//! A listing owns the ordered list of its review ids; each review points back
//! at its listing. Repositories keep both sides in step: adding or removing a
//! review updates both, and deleting a listing deletes its reviews.

pub mod entities;
pub mod repositories;
