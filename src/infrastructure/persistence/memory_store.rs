//! In-process storage backend.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Listing, ListingDetails, ListingFields, NewReview, Review};
use crate::domain::repositories::{ListingRepository, ReviewRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    next_listing_id: i64,
    next_review_id: i64,
    listings: BTreeMap<i64, Listing>,
    reviews: BTreeMap<i64, Review>,
}

impl Tables {
    fn next_listing_id(&mut self) -> i64 {
        self.next_listing_id += 1;
        self.next_listing_id
    }

    fn next_review_id(&mut self) -> i64 {
        self.next_review_id += 1;
        self.next_review_id
    }
}

/// A store that keeps listings and reviews in memory.
///
/// Implements both [`ListingRepository`] and [`ReviewRepository`] over one set
/// of tables behind a single lock, so every multi-step write (cascading
/// delete, attach/detach review) is applied as one unit.
///
/// # Use Cases
///
/// - Development without PostgreSQL (`DATABASE_URL` not set)
/// - HTTP tests that exercise the full router
///
/// Data does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Listing>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.listings.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ListingDetails>, AppError> {
        let tables = self.tables.read().await;

        let Some(listing) = tables.listings.get(&id) else {
            return Ok(None);
        };

        let reviews = listing
            .review_ids
            .iter()
            .map(|review_id| {
                tables.reviews.get(review_id).cloned().ok_or_else(|| {
                    AppError::internal(format!(
                        "Listing {id} references missing review {review_id}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ListingDetails {
            listing: listing.clone(),
            reviews,
        }))
    }

    async fn create(&self, fields: ListingFields) -> Result<Listing, AppError> {
        let mut tables = self.tables.write().await;

        let now = Utc::now();
        let listing = Listing {
            id: tables.next_listing_id(),
            image: fields.image(),
            title: fields.title,
            description: fields.description.flatten(),
            price: fields.price,
            location: fields.location,
            country: fields.country,
            review_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        tables.listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn update(&self, id: i64, fields: ListingFields) -> Result<Option<Listing>, AppError> {
        let mut tables = self.tables.write().await;

        Ok(tables.listings.get_mut(&id).map(|listing| {
            listing.apply(fields);
            listing.updated_at = Utc::now();
            listing.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        let Some(listing) = tables.listings.remove(&id) else {
            return Ok(false);
        };

        let before = tables.reviews.len();
        for review_id in &listing.review_ids {
            tables.reviews.remove(review_id);
        }
        tables.reviews.retain(|_, review| review.listing_id != id);

        tracing::info!(
            listing_id = id,
            reviews_removed = before - tables.reviews.len(),
            "Listing deleted"
        );

        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn add_to_listing(
        &self,
        listing_id: i64,
        new_review: NewReview,
    ) -> Result<Option<Review>, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.listings.contains_key(&listing_id) {
            return Ok(None);
        }

        let review = Review {
            id: tables.next_review_id(),
            listing_id,
            comment: new_review.comment,
            rating: new_review.rating,
            created_at: Utc::now(),
        };

        tables.reviews.insert(review.id, review.clone());
        if let Some(listing) = tables.listings.get_mut(&listing_id) {
            listing.review_ids.push(review.id);
        }

        Ok(Some(review))
    }

    async fn remove_from_listing(
        &self,
        listing_id: i64,
        review_id: i64,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        let belongs = tables
            .reviews
            .get(&review_id)
            .is_some_and(|review| review.listing_id == listing_id);
        if !belongs {
            return Ok(false);
        }

        tables.reviews.remove(&review_id);
        if let Some(listing) = tables.listings.get_mut(&listing_id) {
            listing.review_ids.retain(|id| *id != review_id);
        }

        Ok(true)
    }

    async fn list_for_listing(&self, listing_id: i64) -> Result<Vec<Review>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .reviews
            .values()
            .filter(|review| review.listing_id == listing_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, image_url: Option<&str>) -> ListingFields {
        ListingFields {
            title: title.to_string(),
            description: Some(Some("Sea view".to_string())),
            price: 2500.0,
            location: "Goa".to_string(),
            country: "India".to_string(),
            image_url: image_url.map(str::to_string),
        }
    }

    fn review(comment: &str) -> NewReview {
        NewReview {
            comment: comment.to_string(),
            rating: Some(4),
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = MemoryStore::new();

        let created = store.create(fields("Villa", None)).await.unwrap();
        let found = store.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.listing.title, "Villa");
        assert_eq!(found.listing.price, 2500.0);
        assert_eq!(found.listing.description.as_deref(), Some("Sea view"));
        assert!(found.listing.image.is_none());
        assert!(found.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::new();

        let a = store.create(fields("A", None)).await.unwrap();
        let b = store.create(fields("B", None)).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_update_preserves_image_without_new_url() {
        let store = MemoryStore::new();
        let created = store
            .create(fields("Villa", Some("https://img.example.com/a.jpg")))
            .await
            .unwrap();

        let updated = store
            .update(created.id, fields("Villa renamed", None))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Villa renamed");
        assert_eq!(updated.image, created.image);
    }

    #[tokio::test]
    async fn test_update_keeps_description_left_out() {
        let store = MemoryStore::new();
        let created = store.create(fields("Villa", None)).await.unwrap();

        let mut partial = fields("Villa", None);
        partial.description = None;
        let updated = store.update(created.id, partial).await.unwrap().unwrap();
        assert_eq!(updated.description.as_deref(), Some("Sea view"));

        let mut cleared = fields("Villa", None);
        cleared.description = Some(None);
        let updated = store.update(created.id, cleared).await.unwrap().unwrap();
        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_listing() {
        let store = MemoryStore::new();
        assert!(store.update(42, fields("X", None)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_review_appends_in_order() {
        let store = MemoryStore::new();
        let listing = store.create(fields("Villa", None)).await.unwrap();

        let first = store
            .add_to_listing(listing.id, review("first"))
            .await
            .unwrap()
            .unwrap();
        let second = store
            .add_to_listing(listing.id, review("second"))
            .await
            .unwrap()
            .unwrap();

        let details = store.find_by_id(listing.id).await.unwrap().unwrap();
        assert_eq!(details.listing.review_ids, vec![first.id, second.id]);
        let comments: Vec<_> = details.reviews.iter().map(|r| r.comment.as_str()).collect();
        assert_eq!(comments, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_add_review_to_missing_listing_writes_nothing() {
        let store = MemoryStore::new();

        let result = store.add_to_listing(7, review("orphan")).await.unwrap();

        assert!(result.is_none());
        assert!(store.list_for_listing(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_review_detaches_and_deletes() {
        let store = MemoryStore::new();
        let listing = store.create(fields("Villa", None)).await.unwrap();
        let kept = store
            .add_to_listing(listing.id, review("kept"))
            .await
            .unwrap()
            .unwrap();
        let removed = store
            .add_to_listing(listing.id, review("removed"))
            .await
            .unwrap()
            .unwrap();

        assert!(
            store
                .remove_from_listing(listing.id, removed.id)
                .await
                .unwrap()
        );

        let details = store.find_by_id(listing.id).await.unwrap().unwrap();
        assert_eq!(details.listing.review_ids, vec![kept.id]);
        assert_eq!(store.list_for_listing(listing.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_review_scoped_to_listing() {
        let store = MemoryStore::new();
        let a = store.create(fields("A", None)).await.unwrap();
        let b = store.create(fields("B", None)).await.unwrap();
        let on_a = store
            .add_to_listing(a.id, review("on a"))
            .await
            .unwrap()
            .unwrap();

        assert!(!store.remove_from_listing(b.id, on_a.id).await.unwrap());
        assert!(!store.remove_from_listing(a.id, 999).await.unwrap());
        assert_eq!(store.list_for_listing(a.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_for_any_review_count() {
        for n in 0..4 {
            let store = MemoryStore::new();
            let doomed = store.create(fields("Doomed", None)).await.unwrap();
            let survivor = store.create(fields("Survivor", None)).await.unwrap();
            for i in 0..n {
                store
                    .add_to_listing(doomed.id, review(&format!("review {i}")))
                    .await
                    .unwrap();
            }
            store
                .add_to_listing(survivor.id, review("stays"))
                .await
                .unwrap();

            assert!(store.delete(doomed.id).await.unwrap());

            assert!(store.find_by_id(doomed.id).await.unwrap().is_none());
            assert!(store.list_for_listing(doomed.id).await.unwrap().is_empty());
            assert_eq!(store.list_for_listing(survivor.id).await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_delete_missing_listing() {
        let store = MemoryStore::new();
        assert!(!store.delete(1).await.unwrap());
    }
}
