//! REST client for the catalog service.
//!
//! # Architecture
//!
//! - The catalog service is a json-server style REST API and the source of
//!   truth for every record. Nothing is cached locally.
//! - One collection per [`Resource`]: list (`GET /products?...`), read
//!   (`GET /products/7`), create (`POST`), partial update (`PATCH`) and
//!   delete (`DELETE`).
//! - List filters follow json-server conventions, built with [`ListQuery`].
//!   The total number of matches is reported in the `X-Total-Count` header.
//!
//! # Example
//!
//! ```rust,ignore
//! use homestore_storefront::catalog::{CatalogClient, ListQuery, SortField, SortOrder};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let query = ListQuery::new()
//!     .category_like("Chairs")
//!     .sort(SortField::Price, SortOrder::Asc)
//!     .paginate(1, 12);
//! let listing = client.list_products(&query).await?;
//! println!("{} of {}", listing.items.len(), listing.total);
//! ```

mod cart;
mod client;
mod favorites;
mod orders;
mod products;
mod query;
mod reviews;
mod users;

pub use client::{CatalogClient, Listing, TOTAL_COUNT_HEADER};
pub use query::{ListQuery, SortField, SortOrder};

use core::fmt;

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("catalog service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the base URL.
    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Collections exposed by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Cart,
    Favorites,
    Reviews,
    Users,
    Orders,
}

impl Resource {
    /// Path segment of the collection.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Favorites => "favorites",
            Self::Reviews => "reviews",
            Self::Users => "users",
            Self::Orders => "orders",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
