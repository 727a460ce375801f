//! Listing entity representing a property offered on the site.

use chrono::{DateTime, Utc};

use super::review::Review;

/// Filename stored alongside every image URL.
///
/// Images are referenced by URL only; nothing is uploaded, so the filename is a
/// fixed placeholder rather than something derived from an upload.
pub const IMAGE_FILENAME_PLACEHOLDER: &str = "listingimage";

/// Image reference attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingImage {
    pub url: String,
    pub filename: String,
}

impl ListingImage {
    /// Builds an image reference for a submitted URL with the placeholder filename.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: IMAGE_FILENAME_PLACEHOLDER.to_string(),
        }
    }
}

/// A property listing.
///
/// `review_ids` is the forward reference list to the listing's reviews, in the
/// order they were added. Every id in it refers to an existing [`Review`].
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub location: String,
    pub country: String,
    pub image: Option<ListingImage>,
    pub review_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Formats the price with thousands separators, e.g. `12,500` or `99.50`.
    pub fn price_label(&self) -> String {
        format_price(self.price)
    }

    /// Number of reviews attached to the listing.
    pub fn review_count(&self) -> usize {
        self.review_ids.len()
    }

    /// Merges submitted fields into the listing.
    ///
    /// Required fields are always replaced. The description changes only when
    /// it was submitted. The image is replaced entirely when a new URL is
    /// supplied and left untouched otherwise.
    pub fn apply(&mut self, fields: ListingFields) {
        self.title = fields.title;
        if let Some(description) = fields.description {
            self.description = description;
        }
        self.price = fields.price;
        self.location = fields.location;
        self.country = fields.country;
        if let Some(url) = fields.image_url {
            self.image = Some(ListingImage::from_url(url));
        }
    }
}

/// Validated input for creating or updating a listing.
///
/// `description` distinguishes a key that was left out (`None`, keep the
/// stored value) from one submitted blank (`Some(None)`, clear it).
/// `image_url: None` means "no image submitted": a new listing gets no image
/// and an updated listing keeps the one it has.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub title: String,
    pub description: Option<Option<String>>,
    pub price: f64,
    pub location: String,
    pub country: String,
    pub image_url: Option<String>,
}

impl ListingFields {
    /// Description that a newly created listing stores for these fields.
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(|d| d.as_deref())
    }

    /// Image that a newly created listing stores for these fields.
    pub fn image(&self) -> Option<ListingImage> {
        self.image_url.as_deref().map(ListingImage::from_url)
    }
}

/// A listing together with its resolved reviews, in list order.
#[derive(Debug, Clone)]
pub struct ListingDetails {
    pub listing: Listing,
    pub reviews: Vec<Review>,
}

fn format_price(price: f64) -> String {
    let rounded = format!("{price:.2}");
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction == "00" {
        grouped
    } else {
        format!("{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_listing() -> Listing {
        Listing {
            id: 1,
            title: "Cabin".to_string(),
            description: Some("Quiet place in the woods".to_string()),
            price: 1200.0,
            location: "Aspen".to_string(),
            country: "United States".to_string(),
            image: Some(ListingImage::from_url("https://img.example.com/a.jpg")),
            review_ids: vec![3, 7],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fields(image_url: Option<&str>) -> ListingFields {
        ListingFields {
            title: "Cabin deluxe".to_string(),
            description: None,
            price: 1500.0,
            location: "Vail".to_string(),
            country: "United States".to_string(),
            image_url: image_url.map(str::to_string),
        }
    }

    #[test]
    fn test_image_from_url_uses_placeholder_filename() {
        let image = ListingImage::from_url("https://img.example.com/x.png");
        assert_eq!(image.url, "https://img.example.com/x.png");
        assert_eq!(image.filename, "listingimage");
    }

    #[test]
    fn test_apply_without_image_keeps_existing() {
        let mut listing = test_listing();
        listing.apply(fields(None));

        assert_eq!(listing.title, "Cabin deluxe");
        assert_eq!(listing.price, 1500.0);
        assert_eq!(
            listing.description.as_deref(),
            Some("Quiet place in the woods")
        );
        assert_eq!(
            listing.image,
            Some(ListingImage::from_url("https://img.example.com/a.jpg"))
        );
        assert_eq!(listing.review_ids, vec![3, 7]);
    }

    #[test]
    fn test_apply_description_only_when_submitted() {
        let mut listing = test_listing();
        let mut update = fields(None);
        update.description = Some(Some("Renovated".to_string()));
        listing.apply(update);
        assert_eq!(listing.description.as_deref(), Some("Renovated"));

        let mut update = fields(None);
        update.description = Some(None);
        listing.apply(update);
        assert!(listing.description.is_none());
    }

    #[test]
    fn test_apply_with_image_replaces_it() {
        let mut listing = test_listing();
        listing.image = Some(ListingImage {
            url: "https://old.example.com/a.jpg".to_string(),
            filename: "uploaded-name".to_string(),
        });

        listing.apply(fields(Some("https://img.example.com/b.jpg")));

        let image = listing.image.unwrap();
        assert_eq!(image.url, "https://img.example.com/b.jpg");
        assert_eq!(image.filename, IMAGE_FILENAME_PLACEHOLDER);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(1200.0), "1,200");
        assert_eq!(format_price(1234567.0), "1,234,567");
        assert_eq!(format_price(99.5), "99.50");
    }

    #[test]
    fn test_price_label_beyond_integer_range() {
        assert_eq!(format_price(1e20), "100,000,000,000,000,000,000");
        assert!(format_price(1e300).starts_with("1,000,000,"));
    }

    #[test]
    fn test_review_count() {
        assert_eq!(test_listing().review_count(), 2);
    }
}
