//! Application state shared by every page.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::models::{Session, SessionStore};
use crate::pages::{AccountPage, AdminPage, CartPage, FavoritesPage, ProductPage, ShopPage};

/// Storefront state: configuration, catalog client and session store.
///
/// This struct is cheaply cloneable via `Arc`; page controllers borrow from
/// it.
#[derive(Debug, Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

#[derive(Debug)]
struct StorefrontInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    sessions: SessionStore,
}

impl Storefront {
    /// Create the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let sessions = SessionStore::new(config.session_file.clone());

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                sessions,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// The stored session; `None` when logged out or when the file is
    /// unreadable (logged).
    pub async fn session(&self) -> Option<Session> {
        match self.inner.sessions.load().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read session");
                None
            }
        }
    }

    #[must_use]
    pub fn shop(&self) -> ShopPage<'_> {
        ShopPage::new(self.catalog())
    }

    #[must_use]
    pub fn product_page(&self) -> ProductPage<'_> {
        ProductPage::new(self.catalog())
    }

    #[must_use]
    pub fn cart(&self) -> CartPage<'_> {
        CartPage::new(self.catalog())
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesPage<'_> {
        FavoritesPage::new(self.catalog())
    }

    #[must_use]
    pub fn account(&self) -> AccountPage<'_> {
        AccountPage::new(self.catalog(), self.sessions())
    }

    #[must_use]
    pub fn admin(&self) -> AdminPage<'_> {
        AdminPage::new(self.catalog())
    }
}
