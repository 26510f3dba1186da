//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, ReviewId, UserId};
use crate::validation::FieldErrors;

/// Shortest accepted review text, in characters.
pub const MIN_REVIEW_LENGTH: usize = 10;

/// A customer's review of a product they bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub text: String,
    /// Stars, 1 to 5.
    pub rating: u8,
    pub date: DateTime<Utc>,
}

/// Body for posting a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub text: String,
    pub rating: u8,
    pub date: DateTime<Utc>,
}

/// Body for editing a review; the date is refreshed on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    pub text: String,
    pub rating: u8,
    pub date: DateTime<Utc>,
}

/// Check review text and star rating.
///
/// # Errors
///
/// Returns the text and rating problems found.
pub fn validate_review(text: &str, rating: u8) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if text.chars().count() < MIN_REVIEW_LENGTH {
        errors.add("text", "Review must be at least 10 characters");
    }
    if !(1..=5).contains(&rating) {
        errors.add("rating", "Select a rating from 1 to 5 stars");
    }
    errors.into_result()
}

/// Mean star rating rounded to one decimal place; 0 for no reviews.
#[must_use]
pub fn average_rating<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> f64 {
    let (sum, count) = reviews
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), r| (sum + u32::from(r.rating), count + 1));
    if count == 0 {
        return 0.0;
    }
    (f64::from(sum) / f64::from(count) * 10.0).round() / 10.0
}
