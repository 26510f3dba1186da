//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Login, logout, registration and profile editing
//! - `cart` - Cart lines, totals and checkout
//! - `favorites` - Favorite marks
//! - `reviews` - Review eligibility, posting and product rating upkeep
//! - `products` - Admin product management
//!
//! Services borrow the shared [`crate::catalog::CatalogClient`] and return
//! `Result<_, AppError>`; the page controllers in [`crate::pages`] decide how
//! a failure is shown.

pub mod auth;
pub mod cart;
pub mod favorites;
pub mod products;
pub mod reviews;

pub use auth::{AuthService, LoginForm, ProfileForm, RegistrationForm};
pub use cart::{CartLine, CartOutcome, CartService, CartTotals, CheckoutOutcome, UNKNOWN_PRODUCT};
pub use favorites::{FavoriteEntry, FavoriteToggle, FavoritesService};
pub use products::{DeleteReport, ProductAdminService};
pub use reviews::{ReviewEligibility, ReviewService, ReviewWithAuthor, UNKNOWN_AUTHOR};

use homestore_core::{Product, ProductId};

use crate::error::AppError;
use crate::models::Session;

/// The session, or `AppError::Unauthorized` when logged out.
pub(crate) fn require_session(session: Option<&Session>) -> Result<&Session, AppError> {
    session.ok_or(AppError::Unauthorized)
}

/// Find the product for `id` among `products`.
pub(crate) fn find_product(products: &[Product], id: ProductId) -> Option<Product> {
    products.iter().find(|p| p.id == id).cloned()
}
