//! Favorites service.

use std::collections::HashSet;

use homestore_core::{FavoriteId, FavoriteItem, NewFavorite, Product, ProductId, UserId};
use tracing::{info, instrument};

use super::find_product;
use crate::catalog::CatalogClient;
use crate::error::AppError;

/// What a favorite toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added(FavoriteItem),
    Removed(FavoriteId),
}

impl FavoriteToggle {
    /// Whether the product is a favorite after the toggle.
    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// A favorite joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub favorite: FavoriteItem,
    pub product: Option<Product>,
}

pub struct FavoritesService<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> FavoritesService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    /// Remove the favorite if there is one, otherwise create it.
    ///
    /// Lookup and write are separate requests and not atomic.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<FavoriteToggle, AppError> {
        if let Some(existing) = self.catalog.favorite_for(user_id, product_id).await? {
            self.catalog.delete_favorite(existing.id).await?;
            info!(favorite_id = %existing.id, "Removed from favorites");
            return Ok(FavoriteToggle::Removed(existing.id));
        }

        let favorite = self
            .catalog
            .add_favorite(&NewFavorite {
                user_id,
                product_id,
            })
            .await?;
        info!(favorite_id = %favorite.id, "Added to favorites");
        Ok(FavoriteToggle::Added(favorite))
    }

    /// Ids of every product the user marked.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the request fails.
    pub async fn product_ids(&self, user_id: UserId) -> Result<HashSet<ProductId>, AppError> {
        Ok(self
            .catalog
            .favorites(user_id)
            .await?
            .into_iter()
            .map(|f| f.product_id)
            .collect())
    }

    /// Whether the user marked this product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the request fails.
    pub async fn is_favorite(&self, user_id: UserId, product_id: ProductId) -> Result<bool, AppError> {
        Ok(self.catalog.favorite_for(user_id, product_id).await?.is_some())
    }

    /// The user's favorites with their products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn entries(&self, user_id: UserId) -> Result<Vec<FavoriteEntry>, AppError> {
        let favorites = self.catalog.favorites(user_id).await?;
        let ids: Vec<ProductId> = favorites.iter().map(|f| f.product_id).collect();
        let products = self.catalog.products_by_ids(&ids).await?;

        Ok(favorites
            .into_iter()
            .map(|favorite| FavoriteEntry {
                product: find_product(&products, favorite.product_id),
                favorite,
            })
            .collect())
    }

    /// Remove one of the user's favorites by record id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record is not one of the user's.
    #[instrument(skip(self), fields(user_id = %user_id, favorite_id = %favorite_id))]
    pub async fn remove(&self, user_id: UserId, favorite_id: FavoriteId) -> Result<(), AppError> {
        let owned = self
            .catalog
            .favorites(user_id)
            .await?
            .iter()
            .any(|f| f.id == favorite_id);
        if !owned {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }
        self.catalog.delete_favorite(favorite_id).await?;
        Ok(())
    }
}
