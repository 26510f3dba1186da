//! User accounts.
//!
//! Lookups by phone, e-mail and nickname match the stored string exactly.

use homestore_core::{User, UserId, UserProfile};

use super::{CatalogClient, CatalogError, ListQuery, Resource};

impl CatalogClient {
    /// A single user.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the user does not exist.
    pub async fn user(&self, id: UserId) -> Result<User, CatalogError> {
        self.get(Resource::Users, id.as_i64()).await
    }

    /// The user registered with `phone`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn user_by_phone(&self, phone: &str) -> Result<Option<User>, CatalogError> {
        self.user_by("phone", phone).await
    }

    /// The user registered with `email`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        self.user_by("email", email).await
    }

    /// The user going by `nickname`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn user_by_nickname(&self, nickname: &str) -> Result<Option<User>, CatalogError> {
        self.user_by("nickname", nickname).await
    }

    async fn user_by(&self, field: &'static str, value: &str) -> Result<Option<User>, CatalogError> {
        let query = ListQuery::new().filter(field, value);
        self.first(Resource::Users, &query).await
    }

    /// The users among `ids` that still exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = ListQuery::new().id_in(ids.iter());
        Ok(self.list(Resource::Users, &query).await?.items)
    }

    /// Register an account.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or response parsing fails.
    pub async fn create_user(&self, profile: &UserProfile) -> Result<User, CatalogError> {
        self.create(Resource::Users, profile).await
    }

    /// Overwrite the editable fields of an account.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the user does not exist.
    pub async fn update_user(&self, id: UserId, profile: &UserProfile) -> Result<User, CatalogError> {
        self.patch(Resource::Users, id.as_i64(), profile).await
    }
}
