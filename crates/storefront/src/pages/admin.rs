//! Admin product panel.

use homestore_core::{NewProduct, ProductId, ProductPatch};

use super::{Alert, failure};
use crate::catalog::CatalogClient;
use crate::models::Session;
use crate::services::ProductAdminService;

pub struct AdminPage<'a> {
    products: ProductAdminService<'a>,
}

impl<'a> AdminPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self {
            products: ProductAdminService::new(catalog),
        }
    }

    pub async fn create(&self, session: Option<&Session>, product: &NewProduct) -> Alert {
        match self.products.create(session, product).await {
            Ok(created) => Alert::success(format!("Product \"{}\" added", created.name)),
            Err(e) => failure(&e, "Failed to add product"),
        }
    }

    pub async fn update(
        &self,
        session: Option<&Session>,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Alert {
        match self.products.update(session, id, patch).await {
            Ok(updated) => Alert::success(format!("Product \"{}\" updated", updated.name)),
            Err(e) => failure(&e, "Failed to update product"),
        }
    }

    /// Delete a product after its reviews.
    ///
    /// A failure part way is reported as an error alert; whatever was
    /// deleted before it stays deleted.
    pub async fn delete(&self, session: Option<&Session>, id: ProductId) -> Alert {
        match self.products.delete(session, id).await {
            Ok(report) if report.reviews_removed > 0 => Alert::success(format!(
                "Product deleted along with {} review(s)",
                report.reviews_removed
            )),
            Ok(_) => Alert::success("Product deleted"),
            Err(e) => failure(&e, "Failed to delete product"),
        }
    }
}
