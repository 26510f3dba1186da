//! Admin product management.

use homestore_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::{info, instrument, warn};

use super::require_session;
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::Session;

/// What a product deletion removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteReport {
    pub product_id: ProductId,
    pub reviews_removed: usize,
}

pub struct ProductAdminService<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> ProductAdminService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for non-admins and
    /// `AppError::Validation` for bad fields.
    #[instrument(skip(self, session, product), fields(name = %product.name))]
    pub async fn create(
        &self,
        session: Option<&Session>,
        product: &NewProduct,
    ) -> Result<Product, AppError> {
        require_admin(session)?;
        product.validate()?;

        let created = self.catalog.create_product(product).await?;
        info!(product_id = %created.id, "Product created");
        Ok(created)
    }

    /// Change some fields of a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for non-admins, `AppError::Validation`
    /// for bad fields or an empty patch, `AppError::NotFound` if the product
    /// does not exist.
    #[instrument(skip(self, session, patch), fields(product_id = %id))]
    pub async fn update(
        &self,
        session: Option<&Session>,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, AppError> {
        require_admin(session)?;
        if patch.is_empty() {
            return Err(homestore_core::FieldErrors::single("product", "Nothing to update").into());
        }
        patch.validate()?;

        let updated = self
            .catalog
            .update_product(id, patch)
            .await
            .map_err(|e| AppError::not_found_as(e, "Product not found"))?;
        info!("Product updated");
        Ok(updated)
    }

    /// Delete every review of the product, then the product.
    ///
    /// Not transactional: a failure part way leaves the reviews deleted so
    /// far gone and the product in place.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for non-admins, `AppError::NotFound` if
    /// the product does not exist.
    #[instrument(skip(self, session), fields(product_id = %id))]
    pub async fn delete(&self, session: Option<&Session>, id: ProductId) -> Result<DeleteReport, AppError> {
        require_admin(session)?;

        let reviews = self.catalog.reviews_for_product(id).await?;
        for (removed, review) in reviews.iter().enumerate() {
            if let Err(e) = self.catalog.delete_review(review.id).await {
                warn!(
                    review_id = %review.id,
                    reviews_removed = removed,
                    error = %e,
                    "Product delete stopped part way through its reviews"
                );
                return Err(e.into());
            }
        }

        self.catalog
            .delete_product(id)
            .await
            .map_err(|e| AppError::not_found_as(e, "Product not found"))?;
        info!(reviews_removed = reviews.len(), "Product deleted");

        Ok(DeleteReport {
            product_id: id,
            reviews_removed: reviews.len(),
        })
    }
}

fn require_admin(session: Option<&Session>) -> Result<&Session, AppError> {
    let session = require_session(session)?;
    if !session.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can manage products".to_string(),
        ));
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use homestore_core::{Role, UserId};

    use super::*;

    #[test]
    fn test_require_admin() {
        let admin = Session::new(UserId::new(1), Role::Admin);
        let customer = Session::new(UserId::new(2), Role::Customer);

        assert!(require_admin(Some(&admin)).is_ok());
        assert!(matches!(require_admin(Some(&customer)), Err(AppError::Forbidden(_))));
        assert!(matches!(require_admin(None), Err(AppError::Unauthorized)));
    }
}
