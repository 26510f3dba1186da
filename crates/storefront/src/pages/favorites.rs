//! Favorites page.

use homestore_core::{FavoriteId, Price, ProductId};
use tracing::{error, instrument};

use super::{Alert, failure};
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::Session;
use crate::services::{FavoriteEntry, FavoritesService, UNKNOWN_PRODUCT, require_session};

/// One favorite tile.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteCard {
    pub favorite_id: FavoriteId,
    pub product_id: ProductId,
    pub name: String,
    /// `None` when the product is gone.
    pub price: Option<Price>,
    pub image: String,
}

impl From<FavoriteEntry> for FavoriteCard {
    fn from(entry: FavoriteEntry) -> Self {
        let FavoriteEntry { favorite, product } = entry;
        Self {
            favorite_id: favorite.id,
            product_id: favorite.product_id,
            name: product
                .as_ref()
                .map_or_else(|| UNKNOWN_PRODUCT.to_string(), |p| p.name.clone()),
            price: product.as_ref().map(|p| p.price),
            image: format!("img/shop/{}.png", favorite.product_id),
        }
    }
}

pub struct FavoritesPage<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> FavoritesPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    /// The user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when logged out. A failed fetch is
    /// logged and shown as an empty list.
    #[instrument(skip(self, session))]
    pub async fn render(&self, session: Option<&Session>) -> Result<Vec<FavoriteCard>, AppError> {
        let session = require_session(session)?;
        match FavoritesService::new(self.catalog).entries(session.user_id).await {
            Ok(entries) => Ok(entries.into_iter().map(FavoriteCard::from).collect()),
            Err(e) => {
                error!(user_id = %session.user_id, error = %e, "Failed to load favorites");
                Ok(Vec::new())
            }
        }
    }

    pub async fn remove(&self, session: Option<&Session>, favorite_id: FavoriteId) -> Alert {
        let result = match require_session(session) {
            Ok(session) => {
                FavoritesService::new(self.catalog)
                    .remove(session.user_id, favorite_id)
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Alert::success("Removed from favorites!"),
            Err(e) => failure(&e, "Failed to remove from favorites"),
        }
    }

    pub async fn add_to_cart(&self, session: Option<&Session>, product_id: ProductId) -> Alert {
        super::add_to_cart(self.catalog, session, product_id).await
    }
}

#[cfg(test)]
mod tests {
    use homestore_core::{FavoriteItem, Product, UserId};

    use super::*;

    fn favorite(product_id: i64) -> FavoriteItem {
        FavoriteItem {
            id: FavoriteId::new(1),
            user_id: UserId::new(2),
            product_id: ProductId::new(product_id),
        }
    }

    #[test]
    fn test_card_for_missing_product() {
        let card = FavoriteCard::from(FavoriteEntry {
            favorite: favorite(5),
            product: None,
        });
        assert_eq!(card.name, UNKNOWN_PRODUCT);
        assert_eq!(card.price, None);
        assert_eq!(card.image, "img/shop/5.png");
    }

    #[test]
    fn test_card_for_product() {
        let card = FavoriteCard::from(FavoriteEntry {
            favorite: favorite(5),
            product: Some(Product {
                id: ProductId::new(5),
                name: "Armchair".to_string(),
                description: String::new(),
                price: Price::from_cents(12_950),
                category: "Chairs".to_string(),
                rating: 0.0,
            }),
        });
        assert_eq!(card.name, "Armchair");
        assert_eq!(card.price.map(|p| p.to_string()).as_deref(), Some("$129.50"));
    }
}
