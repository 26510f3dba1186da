//! Orders.

use homestore_core::{NewOrder, Order, UserId};

use super::{CatalogClient, CatalogError, ListQuery, Resource};

impl CatalogClient {
    /// Every order a user placed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn orders(&self, user_id: UserId) -> Result<Vec<Order>, CatalogError> {
        let query = ListQuery::new().filter("userId", user_id);
        Ok(self.list(Resource::Orders, &query).await?.items)
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, CatalogError> {
        self.create(Resource::Orders, order).await
    }
}
