//! Cart lines.

use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, ProductId, UserId};

const fn one() -> u32 {
    1
}

/// One product in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    #[serde(default = "one")]
    pub quantity: u32,
}

impl CartItem {
    /// Quantity used for totals; records with a zero quantity count as one.
    #[must_use]
    pub const fn effective_quantity(&self) -> u32 {
        if self.quantity == 0 { 1 } else { self.quantity }
    }
}

/// Body for adding a product to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}
