//! Review service.
//!
//! Only customers who bought a product may review it, once. After every
//! change the product's `rating` is recomputed from all of its reviews.

use chrono::Utc;
use homestore_core::{
    NewReview, ProductId, ProductPatch, Review, ReviewId, ReviewPatch, UserId, average_rating,
    validate_review,
};
use tracing::{error, info, instrument};

use super::require_session;
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::Session;

/// Author name shown when the reviewing account is gone.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Whether the current user may post a review for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEligibility {
    /// Administrators never review.
    Admin,
    /// No order of the user contains the product.
    NotPurchased,
    /// The user's existing review.
    AlreadyReviewed(Review),
    /// The review form may be shown.
    CanReview,
}

impl ReviewEligibility {
    /// Message shown instead of the review form.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Admin => Some("Administrators cannot leave or edit reviews."),
            Self::NotPurchased => Some("You can only leave a review after purchasing this product."),
            Self::AlreadyReviewed(_) => Some("You have already submitted a review for this product."),
            Self::CanReview => None,
        }
    }
}

/// A review with its author's nickname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author: String,
}

pub struct ReviewService<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> ReviewService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    /// Reviews of a product with their authors' nicknames.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn for_product(&self, product_id: ProductId) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let reviews = self.catalog.reviews_for_product(product_id).await?;
        let mut author_ids: Vec<UserId> = reviews.iter().map(|r| r.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.catalog.users_by_ids(&author_ids).await?;

        Ok(reviews
            .into_iter()
            .map(|review| {
                let author = authors
                    .iter()
                    .find(|u| u.id == review.user_id)
                    .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |u| u.nickname.clone());
                ReviewWithAuthor { review, author }
            })
            .collect())
    }

    /// Decide whether `session` may review the product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a request fails.
    #[instrument(skip(self), fields(user_id = %session.user_id, product_id = %product_id))]
    pub async fn eligibility(
        &self,
        session: &Session,
        product_id: ProductId,
    ) -> Result<ReviewEligibility, AppError> {
        if session.is_admin() {
            return Ok(ReviewEligibility::Admin);
        }

        let purchased = self
            .catalog
            .orders(session.user_id)
            .await?
            .iter()
            .any(|order| order.contains_product(product_id));
        if !purchased {
            return Ok(ReviewEligibility::NotPurchased);
        }

        match self.catalog.review_by(session.user_id, product_id).await? {
            Some(review) => Ok(ReviewEligibility::AlreadyReviewed(review)),
            None => Ok(ReviewEligibility::CanReview),
        }
    }

    /// Post a review and refresh the product rating.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` without a session,
    /// `AppError::Validation` for bad text or rating, `AppError::Forbidden`
    /// when the user may not review the product.
    #[instrument(skip(self, session, text), fields(product_id = %product_id))]
    pub async fn submit(
        &self,
        session: Option<&Session>,
        product_id: ProductId,
        text: &str,
        rating: u8,
    ) -> Result<Review, AppError> {
        let session = require_session(session)?;
        validate_review(text, rating)?;

        let eligibility = self.eligibility(session, product_id).await?;
        if let Some(message) = eligibility.message() {
            return Err(AppError::Forbidden(message.to_string()));
        }

        let review = self
            .catalog
            .create_review(&NewReview {
                user_id: session.user_id,
                product_id,
                text: text.to_string(),
                rating,
                date: Utc::now(),
            })
            .await?;
        info!(review_id = %review.id, "Review submitted");

        self.refresh_product_rating(product_id).await;
        Ok(review)
    }

    /// Change text and rating of the user's own review.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for admins and for other users' reviews,
    /// `AppError::NotFound` if the review does not exist.
    #[instrument(skip(self, session, text), fields(review_id = %review_id))]
    pub async fn edit(
        &self,
        session: Option<&Session>,
        review_id: ReviewId,
        text: &str,
        rating: u8,
    ) -> Result<Review, AppError> {
        let session = require_session(session)?;
        validate_review(text, rating)?;
        self.own_review(session, review_id).await?;

        let review = self
            .catalog
            .update_review(
                review_id,
                &ReviewPatch {
                    text: text.to_string(),
                    rating,
                    date: Utc::now(),
                },
            )
            .await?;
        info!("Review updated");

        self.refresh_product_rating(review.product_id).await;
        Ok(review)
    }

    /// Delete the user's own review.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for admins and for other users' reviews,
    /// `AppError::NotFound` if the review does not exist.
    #[instrument(skip(self, session), fields(review_id = %review_id))]
    pub async fn delete(&self, session: Option<&Session>, review_id: ReviewId) -> Result<(), AppError> {
        let session = require_session(session)?;
        let review = self.own_review(session, review_id).await?;

        self.catalog.delete_review(review_id).await?;
        info!("Review deleted");

        self.refresh_product_rating(review.product_id).await;
        Ok(())
    }

    async fn own_review(&self, session: &Session, review_id: ReviewId) -> Result<Review, AppError> {
        if session.is_admin() {
            return Err(AppError::Forbidden(
                "Administrators cannot leave or edit reviews.".to_string(),
            ));
        }
        let review = self
            .catalog
            .review(review_id)
            .await
            .map_err(|e| AppError::not_found_as(e, "Review not found"))?;
        if review.user_id != session.user_id {
            return Err(AppError::Forbidden(
                "You can only change your own reviews.".to_string(),
            ));
        }
        Ok(review)
    }

    /// Recompute the product rating as the mean of its reviews.
    ///
    /// Failures are logged and swallowed; the review change itself already
    /// succeeded. Returns the stored rating on success.
    pub async fn refresh_product_rating(&self, product_id: ProductId) -> Option<f64> {
        let reviews = match self.catalog.reviews_for_product(product_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                error!(product_id = %product_id, error = %e, "Failed to load reviews for rating");
                return None;
            }
        };

        let rating = average_rating(&reviews);
        match self
            .catalog
            .update_product(product_id, &ProductPatch::rating(rating))
            .await
        {
            Ok(product) => Some(product.rating),
            Err(e) => {
                error!(product_id = %product_id, error = %e, "Failed to update product rating");
                None
            }
        }
    }
}
