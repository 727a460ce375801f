//! Listing pages and listing form submissions.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use super::{Found, parse_id};
use crate::application::services::listing_service::LISTING_NOT_FOUND;
use crate::domain::entities::{Listing, Review};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::FormOrJson;
use crate::web::forms::ListingSubmission;

/// Renders `templates/listings/index.html`.
#[derive(Template, WebTemplate)]
#[template(path = "listings/index.html")]
pub struct IndexTemplate {
    pub listings: Vec<Listing>,
}

/// Renders `templates/listings/new.html`.
#[derive(Template, WebTemplate)]
#[template(path = "listings/new.html")]
pub struct NewListingTemplate {}

/// Renders `templates/listings/show.html` with the listing's reviews in order.
#[derive(Template, WebTemplate)]
#[template(path = "listings/show.html")]
pub struct ShowListingTemplate {
    pub listing: Listing,
    pub reviews: Vec<Review>,
}

/// Renders `templates/listings/edit.html`.
#[derive(Template, WebTemplate)]
#[template(path = "listings/edit.html")]
pub struct EditListingTemplate {
    pub listing: Listing,
}

/// Lists all listings.
///
/// # Endpoint
///
/// `GET /listings`
pub async fn index_handler(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    let listings = state.listing_service.list_listings().await?;
    Ok(IndexTemplate { listings })
}

/// Shows the new-listing form.
///
/// # Endpoint
///
/// `GET /listings/new`
pub async fn new_listing_handler() -> NewListingTemplate {
    NewListingTemplate {}
}

/// Creates a listing and redirects to the index.
///
/// # Endpoint
///
/// `POST /listings`
///
/// # Request Body
///
/// Form fields `listing[title]`, `listing[description]`, `listing[price]`,
/// `listing[location]`, `listing[country]`, `listing[image]`, or the same
/// object as JSON under `"listing"`.
///
/// # Errors
///
/// Returns 400 with every field error joined by `,` if validation fails;
/// nothing is stored in that case.
pub async fn create_listing_handler(
    State(state): State<AppState>,
    FormOrJson(submission): FormOrJson<ListingSubmission>,
) -> Result<Found, AppError> {
    let fields = submission.validate().into_result()?;

    state.listing_service.create_listing(fields).await?;

    Ok(Found::to("/listings"))
}

/// Shows one listing with its reviews.
///
/// # Endpoint
///
/// `GET /listings/{id}`
///
/// # Errors
///
/// Returns 404 if the listing does not exist.
pub async fn show_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ShowListingTemplate, AppError> {
    let id = parse_id(&id, LISTING_NOT_FOUND)?;
    let details = state.listing_service.get_listing(id).await?;

    Ok(ShowListingTemplate {
        listing: details.listing,
        reviews: details.reviews,
    })
}

/// Shows the edit form for a listing.
///
/// # Endpoint
///
/// `GET /listings/{id}/edit`
pub async fn edit_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<EditListingTemplate, AppError> {
    let id = parse_id(&id, LISTING_NOT_FOUND)?;
    let details = state.listing_service.get_listing(id).await?;

    Ok(EditListingTemplate {
        listing: details.listing,
    })
}

/// Updates a listing and redirects to its page.
///
/// The body is validated before the listing is looked up, so an invalid
/// submission is a 400 even for an unknown id. A blank image field keeps the
/// current image.
///
/// # Endpoint
///
/// `PUT /listings/{id}` (also `PATCH`, or `POST` with `_method=PUT`)
pub async fn update_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormOrJson(submission): FormOrJson<ListingSubmission>,
) -> Result<Found, AppError> {
    let fields = submission.validate().into_result()?;
    let id = parse_id(&id, LISTING_NOT_FOUND)?;

    state.listing_service.update_listing(id, fields).await?;

    Ok(Found(format!("/listings/{id}")))
}

/// Deletes a listing with all of its reviews and redirects to the index.
///
/// # Endpoint
///
/// `DELETE /listings/{id}` (or `POST` with `_method=DELETE`)
pub async fn delete_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Found, AppError> {
    let id = parse_id(&id, LISTING_NOT_FOUND)?;

    state.listing_service.delete_listing(id).await?;

    Ok(Found::to("/listings"))
}
