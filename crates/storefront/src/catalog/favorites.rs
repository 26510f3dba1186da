//! Favorite marks.

use homestore_core::{FavoriteId, FavoriteItem, NewFavorite, ProductId, UserId};

use super::{CatalogClient, CatalogError, ListQuery, Resource};

impl CatalogClient {
    /// Every favorite of a user.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn favorites(&self, user_id: UserId) -> Result<Vec<FavoriteItem>, CatalogError> {
        let query = ListQuery::new().filter("userId", user_id);
        Ok(self.list(Resource::Favorites, &query).await?.items)
    }

    /// The user's favorite record for a product, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn favorite_for(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<FavoriteItem>, CatalogError> {
        let query = ListQuery::new()
            .filter("userId", user_id)
            .filter("productId", product_id);
        self.first(Resource::Favorites, &query).await
    }

    /// Mark a product as favorite.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn add_favorite(&self, favorite: &NewFavorite) -> Result<FavoriteItem, CatalogError> {
        self.create(Resource::Favorites, favorite).await
    }

    /// Remove a favorite mark.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the record does not exist.
    pub async fn delete_favorite(&self, id: FavoriteId) -> Result<(), CatalogError> {
        self.delete(Resource::Favorites, id.as_i64()).await
    }
}
