//! Cart lines.

use homestore_core::{CartItem, CartItemId, NewCartItem, ProductId, UserId};
use serde::Serialize;

use super::{CatalogClient, CatalogError, ListQuery, Resource};

#[derive(Serialize)]
struct QuantityPatch {
    quantity: u32,
}

impl CatalogClient {
    /// Every cart line of a user.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, CatalogError> {
        let query = ListQuery::new().filter("userId", user_id);
        Ok(self.list(Resource::Cart, &query).await?.items)
    }

    /// The user's cart line for a product, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn cart_item_for(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, CatalogError> {
        let query = ListQuery::new()
            .filter("userId", user_id)
            .filter("productId", product_id);
        self.first(Resource::Cart, &query).await
    }

    /// Store a new cart line.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn add_cart_item(&self, item: &NewCartItem) -> Result<CartItem, CatalogError> {
        self.create(Resource::Cart, item).await
    }

    /// Replace the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the line does not exist.
    pub async fn set_cart_quantity(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, CatalogError> {
        self.patch(Resource::Cart, id.as_i64(), &QuantityPatch { quantity })
            .await
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the line does not exist.
    pub async fn delete_cart_item(&self, id: CartItemId) -> Result<(), CatalogError> {
        self.delete(Resource::Cart, id.as_i64()).await
    }
}
