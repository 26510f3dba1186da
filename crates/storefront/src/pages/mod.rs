//! Page controllers.
//!
//! Each page turns service results into a plain view-model (what a front end
//! shows) and every user action into an [`Alert`]. Read failures are logged
//! and shown as empty pages; write failures are logged and shown as error
//! alerts. Nothing here is fatal.

pub mod account;
pub mod admin;
pub mod cart;
pub mod favorites;
pub mod product;
pub mod shop;

pub use account::AccountPage;
pub use admin::AdminPage;
pub use cart::{CartPage, CartView};
pub use favorites::{FavoriteCard, FavoritesPage};
pub use product::{ProductPage, ProductView, ReviewCard};
pub use shop::{CatalogPage, ProductCard, ShopEvent, ShopPage, ShopView};

use homestore_core::ProductId;
use tracing::{debug, error};

use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::Session;
use crate::services::{
    CartOutcome, CartService, FavoriteToggle, FavoritesService, require_session,
};

/// Severity of an [`Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Info,
    Error,
}

/// A message for the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, AlertLevel::Error)
    }
}

/// Log a failed action and build its alert.
///
/// Infrastructure failures show `failed` (e.g. "Failed to add to cart");
/// refusals such as a missing login show their own message.
pub(crate) fn failure(err: &AppError, failed: &str) -> Alert {
    if err.is_internal() {
        error!(error = %err, "{failed}");
        Alert::error(failed)
    } else {
        debug!(error = %err, "Action refused");
        Alert::error(err.alert())
    }
}

/// Add-to-cart button shared by the shop, product and favorites pages.
pub(crate) async fn add_to_cart(
    catalog: &CatalogClient,
    session: Option<&Session>,
    product_id: ProductId,
) -> Alert {
    let result = match require_session(session) {
        Ok(session) => CartService::new(catalog).add(session.user_id, product_id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(CartOutcome::Added(_)) => Alert::success("Added to cart!"),
        Ok(CartOutcome::AlreadyInCart) => Alert::error("This product is already in your cart!"),
        Err(e) => failure(&e, "Failed to add to cart"),
    }
}

/// Favorite toggle shared by the shop and product pages.
pub(crate) async fn toggle_favorite(
    catalog: &CatalogClient,
    session: Option<&Session>,
    product_id: ProductId,
) -> Alert {
    let result = match require_session(session) {
        Ok(session) => {
            FavoritesService::new(catalog)
                .toggle(session.user_id, product_id)
                .await
        }
        Err(e) => Err(e),
    };
    match result {
        Ok(FavoriteToggle::Added(_)) => Alert::success("Added to favorites!"),
        Ok(FavoriteToggle::Removed(_)) => Alert::success("Removed from favorites!"),
        Err(e) => failure(&e, "Failed to update favorites"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let alert = failure(&AppError::Unauthorized, "Failed to add to cart");
        assert!(alert.is_error());
        assert_eq!(alert.message, "Please log in to continue");

        let alert = failure(
            &AppError::Session(crate::models::SessionError::Io(std::io::Error::other("disk"))),
            "Failed to add to cart",
        );
        assert_eq!(alert.message, "Failed to add to cart");
    }
}
