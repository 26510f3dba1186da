//! Favorite marks.

use serde::{Deserialize, Serialize};

use crate::types::{FavoriteId, ProductId, UserId};

/// A product a user marked as favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub product_id: ProductId,
}

/// Body for creating a favorite mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: UserId,
    pub product_id: ProductId,
}
