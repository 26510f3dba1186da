//! Product records.

use homestore_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::instrument;

use super::{CatalogClient, CatalogError, ListQuery, Listing, Resource};

impl CatalogClient {
    /// One page of products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn list_products(&self, query: &ListQuery) -> Result<Listing<Product>, CatalogError> {
        self.list(Resource::Products, query).await
    }

    /// Every product, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.list_products(&ListQuery::new()).await?.items)
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get(Resource::Products, id.as_i64()).await
    }

    /// The products among `ids` that still exist. No request is made for an
    /// empty id list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = ListQuery::new().id_in(ids.iter());
        Ok(self.list(Resource::Products, &query).await?.items)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        self.create(Resource::Products, product).await
    }

    /// Change some fields of a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, CatalogError> {
        self.patch(Resource::Products, id.as_i64(), patch).await
    }

    /// Remove a product. Related records are left alone.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.delete(Resource::Products, id.as_i64()).await
    }
}
