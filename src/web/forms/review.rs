//! Review submission (`review[...]` fields).

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::{FieldErrors, Validation, read_number, read_object, read_text};
use crate::domain::entities::{MAX_RATING, MIN_RATING, NewReview};

const FIELD_ORDER: &[&str] = &["comment", "rating"];

/// Request body for adding a review: `{ "review": { ... } }`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewSubmission {
    pub review: Option<Value>,
}

/// Review fields as submitted, before any checks.
#[derive(Debug, Default, Deserialize)]
struct RawReview {
    comment: Option<Value>,
    rating: Option<Value>,
}

#[derive(Debug, Validate)]
struct ReviewForm {
    #[validate(length(min = 1, message = "is required"))]
    comment: String,
    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "must be between 1 and 5"))]
    rating: Option<i32>,
}

impl ReviewSubmission {
    /// Validates the submission into a [`NewReview`].
    pub fn validate(self) -> Validation<NewReview> {
        let raw: RawReview = match read_object("review", self.review) {
            Ok(raw) => raw,
            Err(message) => return Validation::Invalid(vec![message]),
        };

        let mut errors = FieldErrors::new("review", FIELD_ORDER);

        let comment = read_text(raw.comment.as_ref()).unwrap_or_else(|message| {
            errors.push("comment", message);
            None
        });

        let rating = match read_number(raw.rating.as_ref()) {
            Ok(Some(value)) if value.fract() != 0.0 => {
                errors.push("rating", "must be an integer");
                None
            }
            // Out-of-i32 values saturate and fail the range check below.
            Ok(value) => value.map(|v| v as i32),
            Err(message) => {
                errors.push("rating", message);
                None
            }
        };

        let form = ReviewForm {
            comment: comment.unwrap_or_default(),
            rating,
        };

        if let Err(e) = form.validate() {
            errors.extend(&e);
        }

        if !errors.is_empty() {
            return Validation::Invalid(errors.into_messages());
        }

        Validation::Valid(NewReview {
            comment: form.comment,
            rating: form.rating,
        })
    }
}
