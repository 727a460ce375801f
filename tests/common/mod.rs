#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use wanderlust::domain::entities::{Listing, ListingFields, NewReview, Review};
use wanderlust::domain::repositories::{ListingRepository, ReviewRepository};
use wanderlust::infrastructure::persistence::{
    MemoryStore, PgListingRepository, PgReviewRepository,
};
use wanderlust::routes;
use wanderlust::state::AppState;

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), store.clone());
    (state, store)
}

/// Full application (method override, path normalization, fallbacks) over
/// a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let (state, store) = create_test_state();
    let app = routes::app(state, "public", "uploads");
    (TestServer::new(app).unwrap(), store)
}

pub fn listing_fields(title: &str) -> ListingFields {
    ListingFields {
        title: title.to_string(),
        description: Some(Some("A lovely place".to_string())),
        price: 1200.0,
        location: "Jaipur".to_string(),
        country: "India".to_string(),
        image_url: None,
    }
}

pub async fn create_test_listing(store: &MemoryStore, title: &str) -> Listing {
    store.create(listing_fields(title)).await.unwrap()
}

pub async fn create_test_review(store: &MemoryStore, listing_id: i64, comment: &str) -> Review {
    store
        .add_to_listing(
            listing_id,
            NewReview {
                comment: comment.to_string(),
                rating: Some(4),
            },
        )
        .await
        .unwrap()
        .unwrap()
}

pub fn pg_repositories(pool: PgPool) -> (PgListingRepository, PgReviewRepository) {
    let pool = Arc::new(pool);
    (
        PgListingRepository::new(pool.clone()),
        PgReviewRepository::new(pool),
    )
}

pub async fn count_reviews_for(pool: &PgPool, listing_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE listing_id = $1")
        .bind(listing_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
