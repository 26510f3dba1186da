//! Product reviews.

use homestore_core::{NewReview, ProductId, Review, ReviewId, ReviewPatch, UserId};

use super::{CatalogClient, CatalogError, ListQuery, Resource};

impl CatalogClient {
    /// Every review of a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn reviews_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, CatalogError> {
        let query = ListQuery::new().filter("productId", product_id);
        Ok(self.list(Resource::Reviews, &query).await?.items)
    }

    /// The user's review of a product, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn review_by(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<Review>, CatalogError> {
        let query = ListQuery::new()
            .filter("userId", user_id)
            .filter("productId", product_id);
        self.first(Resource::Reviews, &query).await
    }

    /// A single review.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the review does not exist.
    pub async fn review(&self, id: ReviewId) -> Result<Review, CatalogError> {
        self.get(Resource::Reviews, id.as_i64()).await
    }

    /// Post a review.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, CatalogError> {
        self.create(Resource::Reviews, review).await
    }

    /// Replace text, rating and date of a review.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the review does not exist.
    pub async fn update_review(
        &self,
        id: ReviewId,
        patch: &ReviewPatch,
    ) -> Result<Review, CatalogError> {
        self.patch(Resource::Reviews, id.as_i64(), patch).await
    }

    /// Remove a review.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the review does not exist.
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), CatalogError> {
        self.delete(Resource::Reviews, id.as_i64()).await
    }
}
