//! Review submissions on a listing page.

use axum::extract::{Path, State};

use super::{Found, parse_id};
use crate::application::services::listing_service::LISTING_NOT_FOUND;
use crate::application::services::review_service::REVIEW_NOT_FOUND;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::FormOrJson;
use crate::web::forms::ReviewSubmission;

/// Adds a review to a listing and redirects back to it.
///
/// # Endpoint
///
/// `POST /listings/{id}/reviews`
///
/// # Request Body
///
/// Form fields `review[comment]` and `review[rating]`, or JSON under `"review"`.
///
/// # Errors
///
/// Returns 400 if validation fails and 404 if the listing does not exist.
pub async fn create_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(submission): FormOrJson<ReviewSubmission>,
) -> Result<Found, AppError> {
    let review = submission.validate().into_result()?;
    let listing_id = parse_id(&id, LISTING_NOT_FOUND)?;

    state.review_service.add_review(listing_id, review).await?;

    Ok(Found(format!("/listings/{listing_id}")))
}

/// Removes a review from a listing and redirects back to it.
///
/// # Endpoint
///
/// `DELETE /listings/{id}/reviews/{review_id}` (or `POST` with `_method=DELETE`)
///
/// # Errors
///
/// Returns 404 if the review does not exist on that listing.
pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path((id, review_id)): Path<(String, String)>,
) -> Result<Found, AppError> {
    let listing_id = parse_id(&id, LISTING_NOT_FOUND)?;
    let review_id = parse_id(&review_id, REVIEW_NOT_FOUND)?;

    state
        .review_service
        .delete_review(listing_id, review_id)
        .await?;

    Ok(Found(format!("/listings/{listing_id}")))
}
