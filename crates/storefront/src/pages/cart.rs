//! Cart page.

use homestore_core::CartItemId;
use tracing::{error, instrument};

use super::{Alert, failure};
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::Session;
use crate::services::{CartLine, CartService, CartTotals, CheckoutOutcome, require_session};

/// The cart after a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartView {
    fn new(lines: Vec<CartLine>) -> Self {
        Self {
            totals: CartTotals::of(&lines),
            lines,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the checkout button is live.
    #[must_use]
    pub fn checkout_enabled(&self) -> bool {
        !self.is_empty()
    }
}

pub struct CartPage<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> CartPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    fn service(&self) -> CartService<'a> {
        CartService::new(self.catalog)
    }

    /// The user's cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when logged out. A failed fetch is
    /// logged and shown as an empty cart.
    #[instrument(skip(self, session))]
    pub async fn render(&self, session: Option<&Session>) -> Result<CartView, AppError> {
        let session = require_session(session)?;
        match self.service().lines(session.user_id).await {
            Ok(lines) => Ok(CartView::new(lines)),
            Err(e) => {
                error!(user_id = %session.user_id, error = %e, "Failed to load cart");
                Ok(CartView::default())
            }
        }
    }

    pub async fn update_quantity(
        &self,
        session: Option<&Session>,
        line_id: CartItemId,
        quantity: u32,
    ) -> Alert {
        let result = match require_session(session) {
            Ok(session) => {
                self.service()
                    .update_quantity(session.user_id, line_id, quantity)
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(item) => Alert::success(format!("Quantity updated to {}", item.effective_quantity())),
            Err(e) => failure(&e, "Failed to update quantity"),
        }
    }

    pub async fn remove(&self, session: Option<&Session>, line_id: CartItemId) -> Alert {
        let result = match require_session(session) {
            Ok(session) => self.service().remove(session.user_id, line_id).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Alert::success("Item removed from cart"),
            Err(e) => failure(&e, "Failed to remove item"),
        }
    }

    /// Place an order for everything in the cart and clear it.
    pub async fn checkout(&self, session: Option<&Session>) -> Alert {
        let result = match require_session(session) {
            Ok(session) => self.service().checkout(session.user_id).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(CheckoutOutcome::Placed(_)) => {
                Alert::success("Purchase successful! Your cart has been cleared.")
            }
            Ok(CheckoutOutcome::EmptyCart) => Alert::info("Your cart is empty!"),
            Err(e) => failure(&e, "Failed to process purchase"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestore_core::{CartItem, ProductId, UserId};

    use super::*;

    #[test]
    fn test_empty_cart_disables_checkout() {
        let view = CartView::default();
        assert!(view.is_empty());
        assert!(!view.checkout_enabled());
        assert_eq!(view.totals.items, 0);
    }

    #[test]
    fn test_view_totals() {
        let line = CartLine {
            item: CartItem {
                id: CartItemId::new(1),
                user_id: UserId::new(1),
                product_id: ProductId::new(9),
                quantity: 3,
            },
            product: None,
        };
        let view = CartView::new(vec![line]);
        assert!(view.checkout_enabled());
        assert_eq!(view.totals.items, 3);
        assert_eq!(view.totals.price.to_string(), "$0.00");
    }
}
