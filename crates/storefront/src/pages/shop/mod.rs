//! Shop page: the product catalog with filters and pagination.
//!
//! [`ShopView`] holds everything the user picked (filters and page) and is
//! passed by `&mut` into [`ShopPage::render`], which fetches one page of
//! products and keeps the page number inside the valid range.

pub mod filters;
pub mod pagination;

pub use filters::{CategorySelection, FilterState, SortKey};
pub use pagination::{ITEMS_PER_PAGE, MAX_VISIBLE_PAGES, PageState, PaginationControls};

use std::collections::HashSet;

use homestore_core::{Price, Product, ProductId};
use tracing::{debug, error, instrument};

use super::{AdminPage, Alert};
use crate::catalog::{CatalogClient, Listing};
use crate::models::Session;
use crate::services::FavoritesService;

// =============================================================================
// View state
// =============================================================================

/// Something the user did on the shop page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopEvent {
    Search(String),
    Sort(Option<SortKey>),
    PriceRange {
        min: Option<Price>,
        max: Option<Price>,
    },
    /// Select or deselect one category; a blank label means "All".
    ToggleCategory(String),
    AllCategories,
    ResetFilters,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GoToPage(u32),
}

/// Filters and page of one shop session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopView {
    pub filters: FilterState,
    pub page: PageState,
}

impl ShopView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event. Any filter change goes back to page 1.
    ///
    /// Returns whether the product list must be fetched again.
    pub fn apply(&mut self, event: ShopEvent) -> bool {
        match event {
            ShopEvent::Search(text) => self.filters.search = text.trim().to_string(),
            ShopEvent::Sort(sort) => self.filters.sort = sort,
            ShopEvent::PriceRange { min, max } => {
                self.filters.min_price = min;
                self.filters.max_price = max;
            }
            ShopEvent::ToggleCategory(category) => self.filters.categories.toggle(&category),
            ShopEvent::AllCategories => self.filters.categories.select_all(),
            ShopEvent::ResetFilters => self.filters = FilterState::default(),
            ShopEvent::FirstPage => return self.page.first(),
            ShopEvent::PrevPage => return self.page.prev(),
            ShopEvent::NextPage => return self.page.next(),
            ShopEvent::LastPage => return self.page.last(),
            ShopEvent::GoToPage(page) => return self.page.go_to(page),
        }
        self.page.reset();
        true
    }
}

// =============================================================================
// Rendered page
// =============================================================================

/// One product tile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub rating: f64,
    pub category: String,
    /// Relative picture path, `img/shop/{id}.png`.
    pub image: String,
    /// Marked as a favorite by the logged-in user.
    pub favorite: bool,
}

impl ProductCard {
    fn new(product: Product, favorites: &HashSet<ProductId>) -> Self {
        Self {
            image: product.image_path(),
            favorite: favorites.contains(&product.id),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            rating: product.rating,
            category: product.category,
        }
    }
}

/// The shop page after a render.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub cards: Vec<ProductCard>,
    pub pagination: PaginationControls,
    pub total_items: u64,
    /// Cart and favorite buttons are live. Off for an empty page.
    pub actions_enabled: bool,
    /// Show edit and delete controls.
    pub admin: bool,
}

impl CatalogPage {
    /// Whether the empty state should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// =============================================================================
// ShopPage
// =============================================================================

/// Catalog view controller.
pub struct ShopPage<'a> {
    catalog: &'a CatalogClient,
}

impl<'a> ShopPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient) -> Self {
        Self { catalog }
    }

    /// One page of products matching `filters`, with the total match count.
    ///
    /// A failed request is logged and yields an empty listing, which looks
    /// the same as "no matches".
    #[instrument(skip(self, filters), fields(page = page))]
    pub async fn fetch_products(&self, filters: &FilterState, page: u32) -> Listing<Product> {
        let query = filters.to_query(page, ITEMS_PER_PAGE);
        match self.catalog.list_products(&query).await {
            Ok(listing) => {
                debug!(items = listing.items.len(), total = listing.total, "Fetched products");
                listing
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch products");
                Listing::empty()
            }
        }
    }

    /// Fetch the current page and build the cards and pagination controls.
    ///
    /// When the page number is past the last page (the result set shrank),
    /// it is moved to the last page and fetched once more.
    #[instrument(skip(self, view, session), fields(page = view.page.current_page()))]
    pub async fn render(&self, view: &mut ShopView, session: Option<&Session>) -> CatalogPage {
        let mut listing = self
            .fetch_products(&view.filters, view.page.current_page())
            .await;
        view.page.set_total_items(listing.total);
        if view.page.clamp() {
            debug!(page = view.page.current_page(), "Page out of range, refetching");
            listing = self
                .fetch_products(&view.filters, view.page.current_page())
                .await;
            view.page.set_total_items(listing.total);
            view.page.clamp();
        }

        let favorites = match session {
            Some(session) => self.favorite_ids(session).await,
            None => HashSet::new(),
        };

        let actions_enabled = !listing.is_empty();
        CatalogPage {
            cards: listing
                .items
                .into_iter()
                .map(|product| ProductCard::new(product, &favorites))
                .collect(),
            pagination: view.page.controls(),
            total_items: view.page.total_items(),
            actions_enabled,
            admin: session.is_some_and(Session::is_admin),
        }
    }

    async fn favorite_ids(&self, session: &Session) -> HashSet<ProductId> {
        FavoritesService::new(self.catalog)
            .product_ids(session.user_id)
            .await
            .unwrap_or_else(|e| {
                error!(user_id = %session.user_id, error = %e, "Failed to load favorites");
                HashSet::new()
            })
    }

    /// Favorite or unfavorite a product.
    pub async fn toggle_favorite(&self, session: Option<&Session>, product_id: ProductId) -> Alert {
        super::toggle_favorite(self.catalog, session, product_id).await
    }

    /// Put one unit of a product in the cart; refused if it is already there.
    pub async fn add_to_cart(&self, session: Option<&Session>, product_id: ProductId) -> Alert {
        super::add_to_cart(self.catalog, session, product_id).await
    }

    /// Admin only: delete a product and its reviews.
    pub async fn delete_product(&self, session: Option<&Session>, product_id: ProductId) -> Alert {
        AdminPage::new(self.catalog).delete(session, product_id).await
    }

    /// Distinct category labels in first-seen order; empty on failure.
    pub async fn categories(&self) -> Vec<String> {
        match self.catalog.all_products().await {
            Ok(products) => distinct_categories(&products),
            Err(e) => {
                error!(error = %e, "Failed to load categories");
                Vec::new()
            }
        }
    }
}

fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.category.trim())
        .filter(|c| !c.is_empty() && seen.insert(*c))
        .map(str::to_string)
        .collect()
}
