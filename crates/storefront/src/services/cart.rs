//! Cart service.
//!
//! Cart lines live in the catalog service; this service only joins them with
//! their products and keeps "one line per product" on the client side.

use chrono::Utc;
use homestore_core::{
    CartItem, CartItemId, FieldErrors, NewCartItem, NewOrder, Order, OrderLine, Price, Product,
    ProductId, UserId,
};
use tracing::{info, instrument, warn};

use super::find_product;
use crate::catalog::CatalogClient;
use crate::error::AppError;

/// Shown for lines whose product no longer exists.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Result of adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line with quantity 1 was stored.
    Added(CartItem),
    /// The user already has a line for this product; nothing was changed.
    AlreadyInCart,
}

/// Result of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order was placed and the cart cleared.
    Placed(Order),
    /// There was nothing to order.
    EmptyCart,
}

/// A cart line joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    /// `None` when the product was deleted after being added.
    pub product: Option<Product>,
}

impl CartLine {
    #[must_use]
    pub fn name(&self) -> &str {
        self.product.as_ref().map_or(UNKNOWN_PRODUCT, |p| p.name.as_str())
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.item.effective_quantity()
    }

    /// Price of one unit; zero for a missing product.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.as_ref().map_or(Price::ZERO, |p| p.price)
    }

    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity())
    }
}

/// Cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities, saturating at `u32::MAX`.
    pub items: u32,
    /// Sum of line totals.
    pub price: Price,
}

impl CartTotals {
    #[must_use]
    pub fn of(lines: &[CartLine]) -> Self {
        Self {
            items: lines
                .iter()
                .map(CartLine::quantity)
                .fold(0, u32::saturating_add),
            price: lines.iter().map(CartLine::line_total).sum(),
        }
    }
}

/// Cart operations for one catalog.
pub struct CartService<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    /// Add one unit of a product unless the user already has a line for it.
    ///
    /// The lookup and the insert are two separate requests; two concurrent
    /// calls can both insert.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<CartOutcome, AppError> {
        if self.catalog.cart_item_for(user_id, product_id).await?.is_some() {
            return Ok(CartOutcome::AlreadyInCart);
        }

        let item = self
            .catalog
            .add_cart_item(&NewCartItem {
                user_id,
                product_id,
                quantity: 1,
            })
            .await?;
        info!(cart_item_id = %item.id, "Added to cart");
        Ok(CartOutcome::Added(item))
    }

    /// The user's cart lines with their products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn lines(&self, user_id: UserId) -> Result<Vec<CartLine>, AppError> {
        let items = self.catalog.cart_items(user_id).await?;
        let ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        let products = self.catalog.products_by_ids(&ids).await?;

        Ok(items
            .into_iter()
            .map(|item| CartLine {
                product: find_product(&products, item.product_id),
                item,
            })
            .collect())
    }

    /// Set the quantity of one of the user's lines.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a quantity below 1 (no request is
    /// made), `AppError::NotFound` if the line is not in the user's cart.
    #[instrument(skip(self), fields(user_id = %user_id, cart_item_id = %line_id))]
    pub async fn update_quantity(
        &self,
        user_id: UserId,
        line_id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, AppError> {
        if quantity < 1 {
            return Err(FieldErrors::single("quantity", "Quantity must be at least 1").into());
        }
        self.owned_line(user_id, line_id).await?;
        Ok(self.catalog.set_cart_quantity(line_id, quantity).await?)
    }

    /// Remove one of the user's lines.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the line is not in the user's cart.
    #[instrument(skip(self), fields(user_id = %user_id, cart_item_id = %line_id))]
    pub async fn remove(&self, user_id: UserId, line_id: CartItemId) -> Result<(), AppError> {
        self.owned_line(user_id, line_id).await?;
        self.catalog.delete_cart_item(line_id).await?;
        Ok(())
    }

    async fn owned_line(&self, user_id: UserId, line_id: CartItemId) -> Result<CartItem, AppError> {
        self.catalog
            .cart_items(user_id)
            .await?
            .into_iter()
            .find(|item| item.id == line_id)
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))
    }

    /// Turn the cart into an order, then delete the lines one by one.
    ///
    /// Not transactional: if clearing fails the order stays placed and the
    /// remaining lines stay in the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if placing the order or clearing a line
    /// fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn checkout(&self, user_id: UserId) -> Result<CheckoutOutcome, AppError> {
        let items = self.catalog.cart_items(user_id).await?;
        if items.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let order = self
            .catalog
            .create_order(&NewOrder {
                user_id,
                date: Utc::now(),
                items: items
                    .iter()
                    .map(|item| OrderLine {
                        product_id: item.product_id,
                        quantity: item.effective_quantity(),
                    })
                    .collect(),
            })
            .await?;
        info!(order_id = %order.id, lines = items.len(), "Order placed");

        for item in &items {
            if let Err(e) = self.catalog.delete_cart_item(item.id).await {
                warn!(
                    order_id = %order.id,
                    cart_item_id = %item.id,
                    error = %e,
                    "Order placed but cart could not be cleared"
                );
                return Err(e.into());
            }
        }

        Ok(CheckoutOutcome::Placed(order))
    }
}
