//! Records stored by the catalog service.
//!
//! Field names follow the service's camelCase JSON. `New*` types are request
//! bodies for POST, `*Patch` types are partial bodies for PATCH (absent fields
//! are not serialized).

pub mod cart;
pub mod favorite;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use cart::{CartItem, NewCartItem};
pub use favorite::{FavoriteItem, NewFavorite};
pub use order::{NewOrder, Order, OrderLine};
pub use product::{NewProduct, Product, ProductPatch};
pub use review::{NewReview, Review, ReviewPatch, average_rating, validate_review};
pub use user::{User, UserProfile};
