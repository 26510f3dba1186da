//! HTTP plumbing shared by the typed resource methods.

use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogError, ListQuery, Resource};
use crate::config::CatalogConfig;

/// Response header carrying the number of records matching a list query.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// How much of an error body is kept in [`CatalogError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

/// One page of a list query.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    /// Records on this page, in service order.
    pub items: Vec<T>,
    /// Total matches across all pages.
    pub total: u64,
}

impl<T> Listing<T> {
    /// A listing with no records.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Whether the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog REST service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: builder.build()?,
                base_url: config.api_url.clone(),
            }),
        })
    }

    /// URL of a collection, or of one record when `id` is given.
    fn endpoint(&self, resource: Resource, id: Option<i64>) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty().push(resource.path());
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    /// Turn non-success statuses into errors.
    async fn check(response: Response) -> Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Catalog service returned non-success status"
        );
        Err(CatalogError::Status {
            status,
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        })
    }

    /// Like [`Self::check`], but maps 404 to `CatalogError::NotFound`.
    async fn check_found(
        response: Response,
        resource: Resource,
        id: i64,
    ) -> Result<Response, CatalogError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!("{resource}/{id}")));
        }
        Self::check(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Generic verbs
    // =========================================================================

    /// `GET /{resource}?{query}`.
    #[instrument(skip(self, query), fields(resource = %resource))]
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &ListQuery,
    ) -> Result<Listing<T>, CatalogError> {
        let mut url = self.endpoint(resource, None)?;
        query.apply_to(&mut url);
        debug!(url = %url, "Listing records");

        let response = Self::check(self.inner.client.get(url).send().await?).await?;
        let header_total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let items: Vec<T> = Self::read_json(response).await?;
        let total = header_total.unwrap_or_else(|| u64::try_from(items.len()).unwrap_or(u64::MAX));

        Ok(Listing { items, total })
    }

    /// First record matching `query`, if any.
    pub(crate) async fn first<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &ListQuery,
    ) -> Result<Option<T>, CatalogError> {
        let listing = self.list(resource, query).await?;
        Ok(listing.items.into_iter().next())
    }

    /// `GET /{resource}/{id}`.
    #[instrument(skip(self), fields(resource = %resource))]
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(resource, Some(id))?;
        let response = self.inner.client.get(url).send().await?;
        let response = Self::check_found(response, resource, id).await?;
        Self::read_json(response).await
    }

    /// `POST /{resource}`; returns the stored record with its new id.
    #[instrument(skip(self, body), fields(resource = %resource))]
    pub(crate) async fn create<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(resource, None)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        let response = Self::check(response).await?;
        Self::read_json(response).await
    }

    /// `PATCH /{resource}/{id}`; returns the updated record.
    #[instrument(skip(self, body), fields(resource = %resource))]
    pub(crate) async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        body: &B,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(resource, Some(id))?;
        let response = self.inner.client.patch(url).json(body).send().await?;
        let response = Self::check_found(response, resource, id).await?;
        Self::read_json(response).await
    }

    /// `DELETE /{resource}/{id}`.
    #[instrument(skip(self), fields(resource = %resource))]
    pub(crate) async fn delete(&self, resource: Resource, id: i64) -> Result<(), CatalogError> {
        let url = self.endpoint(resource, Some(id))?;
        let response = self.inner.client.delete(url).send().await?;
        Self::check_found(response, resource, id).await?;
        Ok(())
    }
}
