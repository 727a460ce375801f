//! Listing submission (`listing[...]` fields).

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::{FieldErrors, Validation, read_number, read_object, read_text};
use crate::domain::entities::ListingFields;

const FIELD_ORDER: &[&str] = &[
    "title",
    "description",
    "price",
    "location",
    "country",
    "image",
];

/// Request body for create and update: `{ "listing": { ... } }`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingSubmission {
    pub listing: Option<Value>,
}

/// Listing fields as submitted, before any checks.
///
/// `description` is absent (`None`) when the key was left out and
/// `Some(None)` when it was sent as `null`.
#[derive(Debug, Default, Deserialize)]
struct RawListing {
    title: Option<Value>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    description: Option<Option<Value>>,
    price: Option<Value>,
    location: Option<Value>,
    country: Option<Value>,
    image: Option<Value>,
}

/// Normalized listing fields checked by `validator`.
#[derive(Debug, Validate)]
struct ListingForm {
    #[validate(length(min = 1, message = "is required"))]
    title: String,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    price: f64,
    #[validate(length(min = 1, message = "is required"))]
    location: String,
    #[validate(length(min = 1, message = "is required"))]
    country: String,
    #[validate(url(message = "must be a valid uri"))]
    image: Option<String>,
}

impl ListingSubmission {
    /// Validates the submission into [`ListingFields`].
    pub fn validate(self) -> Validation<ListingFields> {
        let raw: RawListing = match read_object("listing", self.listing) {
            Ok(raw) => raw,
            Err(message) => return Validation::Invalid(vec![message]),
        };

        let mut errors = FieldErrors::new("listing", FIELD_ORDER);
        let mut text = |field: &str, value: Option<&Value>| {
            read_text(value).unwrap_or_else(|message| {
                errors.push(field, message);
                None
            })
        };

        let title = text("title", raw.title.as_ref());
        let description = raw
            .description
            .map(|value| text("description", value.as_ref()));
        let location = text("location", raw.location.as_ref());
        let country = text("country", raw.country.as_ref());
        let image = text("image", raw.image.as_ref());

        let price = match read_number(raw.price.as_ref()) {
            Ok(Some(price)) => price,
            Ok(None) => {
                errors.push("price", "is required");
                0.0
            }
            Err(message) => {
                errors.push("price", message);
                0.0
            }
        };

        let form = ListingForm {
            title: title.unwrap_or_default(),
            price,
            location: location.unwrap_or_default(),
            country: country.unwrap_or_default(),
            image,
        };

        if let Err(e) = form.validate() {
            errors.extend(&e);
        }

        if !errors.is_empty() {
            return Validation::Invalid(errors.into_messages());
        }

        Validation::Valid(ListingFields {
            title: form.title,
            description,
            price: form.price,
            location: form.location,
            country: form.country,
            image_url: form.image,
        })
    }
}
