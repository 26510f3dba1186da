//! Login, registration and profile pages.

use homestore_core::User;
use rand::Rng;

use super::{Alert, failure};
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::{Session, SessionStore};
use crate::services::auth::generate_password;
use crate::services::{AuthService, LoginForm, ProfileForm, RegistrationForm};

pub struct AccountPage<'a> {
    auth: AuthService<'a>,
}

impl<'a> AccountPage<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient, sessions: &'a SessionStore) -> Self {
        Self {
            auth: AuthService::new(catalog, sessions),
        }
    }

    /// Log in; the session is stored on success.
    pub async fn login(&self, form: &LoginForm) -> Alert {
        match self.auth.login(form).await {
            Ok(_) => Alert::success("Login successful!"),
            Err(e) => failure(&e, "Login failed"),
        }
    }

    pub async fn logout(&self) -> Alert {
        match self.auth.logout().await {
            Ok(()) => Alert::success("You have been logged out"),
            Err(e) => failure(&e, "Logout failed"),
        }
    }

    pub async fn register(&self, form: &RegistrationForm) -> Alert {
        match self.auth.register(form).await {
            Ok(_) => Alert::success("Registration successful!"),
            Err(e) => failure(&e, "Registration failed"),
        }
    }

    /// The logged-in user's account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when logged out.
    pub async fn profile(&self, session: Option<&Session>) -> Result<User, AppError> {
        self.auth.profile(session).await
    }

    pub async fn update_profile(&self, session: Option<&Session>, form: &ProfileForm) -> Alert {
        match self.auth.update_profile(session, form).await {
            Ok(_) => Alert::success("Profile updated successfully!"),
            Err(e) => failure(&e, "Failed to update profile"),
        }
    }

    /// A free nickname for the given names.
    ///
    /// # Errors
    ///
    /// Returns an error alert when a name is blank, every attempt was taken
    /// or the lookup failed.
    pub async fn suggest_nickname<R: Rng>(
        &self,
        rng: &mut R,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, Alert> {
        match self.auth.suggest_nickname(rng, first_name, last_name).await {
            Ok(Some(nickname)) => Ok(nickname),
            Ok(None) => Err(Alert::error(
                "Could not find a free nickname, please try again",
            )),
            Err(e) => Err(failure(&e, "Failed to generate nickname")),
        }
    }

    /// A random password the registration form accepts.
    #[must_use]
    pub fn suggest_password() -> String {
        generate_password()
    }
}
