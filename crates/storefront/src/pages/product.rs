//! Product page with reviews.

use homestore_core::{Product, ProductId, ReviewId};
use tracing::{error, instrument};

use super::{Alert, failure};
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::filters;
use crate::models::Session;
use crate::services::{FavoritesService, ReviewEligibility, ReviewService, ReviewWithAuthor};

/// One review as shown under the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    pub id: ReviewId,
    pub author: String,
    pub text: String,
    pub rating: u8,
    /// `★★★★☆`
    pub stars: String,
    pub date: String,
    /// Written by the logged-in user; edit and delete are offered.
    pub own: bool,
}

impl ReviewCard {
    fn new(entry: ReviewWithAuthor, session: Option<&Session>) -> Self {
        let ReviewWithAuthor { review, author } = entry;
        Self {
            own: session.is_some_and(|s| !s.is_admin() && s.user_id == review.user_id),
            stars: filters::stars(review.rating),
            date: filters::review_date(review.date),
            id: review.id,
            author,
            text: review.text,
            rating: review.rating,
        }
    }
}

/// The product page after a render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: Product,
    pub image: String,
    pub favorite: bool,
    pub reviews: Vec<ReviewCard>,
    /// `None` when logged out or when eligibility could not be checked.
    pub eligibility: Option<ReviewEligibility>,
}

impl ProductView {
    /// Whether the review form is shown.
    #[must_use]
    pub const fn can_review(&self) -> bool {
        matches!(self.eligibility, Some(ReviewEligibility::CanReview))
    }

    /// Text shown in place of the review form.
    #[must_use]
    pub fn review_notice(&self) -> Option<&'static str> {
        self.eligibility.as_ref().and_then(ReviewEligibility::message)
    }
}

pub struct ProductPage<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> ProductPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    fn reviews(&self) -> ReviewService<'a> {
        ReviewService::new(self.catalog)
    }

    /// Load the product, its reviews and what the user may do with them.
    ///
    /// Reviews, favorite state and eligibility degrade to empty on failure.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product and
    /// `AppError::Catalog` if the product cannot be loaded.
    #[instrument(skip(self, session), fields(product_id = %product_id))]
    pub async fn render(
        &self,
        session: Option<&Session>,
        product_id: ProductId,
    ) -> Result<ProductView, AppError> {
        let product = self
            .catalog
            .product(product_id)
            .await
            .map_err(|e| AppError::not_found_as(e, "Product not found"))?;

        let reviews = self.reviews().for_product(product_id).await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to load reviews");
            Vec::new()
        });

        let (favorite, eligibility) = match session {
            Some(session) => {
                let favorite = FavoritesService::new(self.catalog)
                    .is_favorite(session.user_id, product_id)
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Failed to load favorite state");
                        false
                    });
                let eligibility = match self.reviews().eligibility(session, product_id).await {
                    Ok(eligibility) => Some(eligibility),
                    Err(e) => {
                        error!(error = %e, "Failed to check review eligibility");
                        None
                    }
                };
                (favorite, eligibility)
            }
            None => (false, None),
        };

        Ok(ProductView {
            image: product.image_path(),
            product,
            favorite,
            reviews: reviews
                .into_iter()
                .map(|entry| ReviewCard::new(entry, session))
                .collect(),
            eligibility,
        })
    }

    pub async fn toggle_favorite(&self, session: Option<&Session>, product_id: ProductId) -> Alert {
        super::toggle_favorite(self.catalog, session, product_id).await
    }

    pub async fn add_to_cart(&self, session: Option<&Session>, product_id: ProductId) -> Alert {
        super::add_to_cart(self.catalog, session, product_id).await
    }

    pub async fn submit_review(
        &self,
        session: Option<&Session>,
        product_id: ProductId,
        text: &str,
        rating: u8,
    ) -> Alert {
        match self.reviews().submit(session, product_id, text, rating).await {
            Ok(_) => Alert::success("Review submitted successfully!"),
            Err(e) => failure(&e, "Failed to submit review"),
        }
    }

    pub async fn edit_review(
        &self,
        session: Option<&Session>,
        review_id: ReviewId,
        text: &str,
        rating: u8,
    ) -> Alert {
        match self.reviews().edit(session, review_id, text, rating).await {
            Ok(_) => Alert::success("Review updated successfully!"),
            Err(e) => failure(&e, "Failed to update review"),
        }
    }

    pub async fn delete_review(&self, session: Option<&Session>, review_id: ReviewId) -> Alert {
        match self.reviews().delete(session, review_id).await {
            Ok(()) => Alert::success("Review deleted successfully!"),
            Err(e) => failure(&e, "Failed to delete review"),
        }
    }
}
