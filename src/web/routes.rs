//! Listing and review route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_listing_handler, create_review_handler, delete_listing_handler, delete_review_handler,
    edit_listing_handler, index_handler, new_listing_handler, show_listing_handler,
    update_listing_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Listing and review pages.
///
/// The static `/listings/new` segment takes priority over `/listings/{id}`.
///
/// # Endpoints
///
/// - `GET    /listings` - All listings
/// - `GET    /listings/new` - New-listing form
/// - `POST   /listings` - Create a listing
/// - `GET    /listings/{id}` - Listing with its reviews
/// - `GET    /listings/{id}/edit` - Edit form
/// - `PUT    /listings/{id}` - Update (also `PATCH`)
/// - `DELETE /listings/{id}` - Delete with its reviews
/// - `POST   /listings/{id}/reviews` - Add a review
/// - `DELETE /listings/{id}/reviews/{review_id}` - Delete a review
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(index_handler).post(create_listing_handler))
        .route("/listings/new", get(new_listing_handler))
        .route(
            "/listings/{id}",
            get(show_listing_handler)
                .put(update_listing_handler)
                .patch(update_listing_handler)
                .delete(delete_listing_handler),
        )
        .route("/listings/{id}/edit", get(edit_listing_handler))
        .route("/listings/{id}/reviews", post(create_review_handler))
        .route(
            "/listings/{id}/reviews/{review_id}",
            delete(delete_review_handler),
        )
}
