//! Page handlers: listings, reviews, greeting and fallback.

mod fallback;
mod listings;
mod reviews;
mod root;

pub use fallback::not_found_handler;
pub use listings::{
    create_listing_handler, delete_listing_handler, edit_listing_handler, index_handler,
    new_listing_handler, show_listing_handler, update_listing_handler,
};
pub use reviews::{create_review_handler, delete_review_handler};
pub use root::root_handler;

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// `302 Found` redirect. `axum::response::Redirect::to` answers `303`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found(pub String);

impl Found {
    pub fn to(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(LOCATION, self.0)]).into_response()
    }
}

/// Parses a path id; anything that is not an integer is reported as missing.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::not_found(not_found))
}
