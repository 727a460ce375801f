//! Review entity representing feedback left on a listing.

use chrono::{DateTime, Utc};

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// Free-text feedback attached to exactly one listing.
///
/// `listing_id` is a back-reference; the owning [`super::Listing`] keeps the
/// ordered list of its review ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub listing_id: i64,
    pub comment: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Renders the rating as filled and empty stars, e.g. `★★★☆☆`.
    pub fn stars(&self) -> Option<String> {
        self.rating.map(|rating| {
            let filled = rating.clamp(0, MAX_RATING) as usize;
            let empty = MAX_RATING as usize - filled;
            format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
        })
    }
}

/// Validated input for adding a review.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub comment: String,
    pub rating: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Option<i32>) -> Review {
        Review {
            id: 1,
            listing_id: 10,
            comment: "Lovely stay".to_string(),
            rating,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stars() {
        assert_eq!(review(Some(3)).stars().as_deref(), Some("★★★☆☆"));
        assert_eq!(review(Some(5)).stars().as_deref(), Some("★★★★★"));
        assert!(review(None).stars().is_none());
    }
}
