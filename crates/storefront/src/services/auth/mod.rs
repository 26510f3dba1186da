//! Account service.
//!
//! Provides login, registration and profile editing against the catalog's
//! `users` collection, and keeps the local session in step.
//!
//! Passwords are stored and compared as typed by the catalog service; the
//! rules here only decide what the forms accept.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument};

use homestore_core::{
    Email, FieldErrors, LoginId, NICKNAME_ATTEMPTS, Phone, Role, User, UserId, UserProfile,
    nickname_candidate, validate_birthdate, validate_password,
};

use super::require_session;
use crate::catalog::CatalogClient;
use crate::error::AppError;
use crate::models::{Session, SessionStore};

/// Login form.
#[derive(Debug)]
pub struct LoginForm {
    /// Phone number or e-mail address.
    pub login: String,
    pub password: SecretString,
}

/// Account fields shared by registration and profile editing.
#[derive(Debug)]
pub struct ProfileForm {
    pub phone: String,
    pub email: String,
    /// `YYYY-MM-DD`.
    pub birthdate: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub nickname: String,
}

impl ProfileForm {
    /// Prefill the form from a stored account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            phone: user.phone.clone(),
            email: user.email.clone(),
            birthdate: user.birthdate.clone(),
            password: SecretString::from(user.password.clone()),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            middle_name: user.middle_name.clone(),
            nickname: user.nickname.clone(),
        }
    }

    fn to_profile(&self, role: Role) -> UserProfile {
        UserProfile {
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            birthdate: self.birthdate.trim().to_string(),
            password: self.password.expose_secret().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            middle_name: self.middle_name.trim().to_string(),
            nickname: self.nickname.trim().to_string(),
            role,
        }
    }
}

/// Registration form.
#[derive(Debug)]
pub struct RegistrationForm {
    pub profile: ProfileForm,
    pub password_confirm: SecretString,
    /// The user agreement was accepted.
    pub agreement: bool,
}

/// Account service.
pub struct AuthService<'a> {
    catalog: &'a CatalogClient,
    sessions: &'a SessionStore,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(catalog: &'a CatalogClient, sessions: &'a SessionStore) -> Self {
        Self { catalog, sessions }
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Log in with a phone number or e-mail address and store the session.
    ///
    /// The user is looked up by phone first, then by e-mail.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` with a `login` or `password` message
    /// for malformed input, unknown logins and wrong passwords.
    #[instrument(skip(self, form))]
    pub async fn login(&self, form: &LoginForm) -> Result<Session, AppError> {
        let login = form.login.trim();
        let password = form.password.expose_secret();

        let mut errors = FieldErrors::new();
        if let Err(message) = LoginId::parse(login) {
            errors.add("login", message);
        }
        if password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()?;

        let user = match self.catalog.user_by_phone(login).await? {
            Some(user) => user,
            None => self
                .catalog
                .user_by_email(login)
                .await?
                .ok_or_else(|| FieldErrors::single("login", "Phone or email not found"))?,
        };

        if user.password != password {
            return Err(FieldErrors::single("password", "Incorrect password").into());
        }

        let session = Session::new(user.id, user.role);
        self.sessions.save(&session).await?;
        info!(user_id = %user.id, role = %user.role, "Logged in");
        Ok(session)
    }

    /// Forget the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session file cannot be removed.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.sessions.clear().await?;
        info!("Logged out");
        Ok(())
    }

    // =========================================================================
    // Registration and profile
    // =========================================================================

    /// Create a customer account. Every field problem is reported at once.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing each rejected field.
    #[instrument(skip(self, form), fields(nickname = %form.profile.nickname))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AppError> {
        let mut errors = self
            .check_profile(&form.profile, None, Utc::now().date_naive())
            .await?;
        if form.profile.password.expose_secret() != form.password_confirm.expose_secret() {
            errors.add("password_confirm", "Passwords do not match");
        }
        if !form.agreement {
            errors.add("agreement", "You must accept the user agreement");
        }
        errors.into_result()?;

        let user = self
            .catalog
            .create_user(&form.profile.to_profile(Role::Customer))
            .await?;
        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    /// The logged-in user's account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` without a session and
    /// `AppError::NotFound` if the account is gone.
    pub async fn profile(&self, session: Option<&Session>) -> Result<User, AppError> {
        let session = require_session(session)?;
        self.catalog
            .user(session.user_id)
            .await
            .map_err(|e| AppError::not_found_as(e, "Account not found"))
    }

    /// Overwrite the logged-in user's account. Uniqueness checks ignore the
    /// user's own record; the role is kept from the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` without a session and
    /// `AppError::Validation` listing each rejected field.
    #[instrument(skip(self, session, form))]
    pub async fn update_profile(
        &self,
        session: Option<&Session>,
        form: &ProfileForm,
    ) -> Result<User, AppError> {
        let session = require_session(session)?;
        self.check_profile(form, Some(session.user_id), Utc::now().date_naive())
            .await?
            .into_result()?;

        let user = self
            .catalog
            .update_user(session.user_id, &form.to_profile(session.role))
            .await
            .map_err(|e| AppError::not_found_as(e, "Account not found"))?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Field checks shared by registration and profile editing.
    ///
    /// Uniqueness is only checked for fields whose format is valid; `owner`
    /// is the account allowed to hold the values already.
    async fn check_profile(
        &self,
        form: &ProfileForm,
        owner: Option<UserId>,
        today: NaiveDate,
    ) -> Result<FieldErrors, AppError> {
        let mut errors = FieldErrors::new();

        let phone = form.phone.trim();
        match Phone::parse(phone) {
            Err(e) => errors.add("phone", e.to_string()),
            Ok(_) => {
                if taken_by_other(self.catalog.user_by_phone(phone).await?, owner) {
                    errors.add("phone", "Phone number already registered");
                }
            }
        }

        let email = form.email.trim();
        match Email::parse(email) {
            Err(e) => errors.add("email", e.to_string()),
            Ok(_) => {
                if taken_by_other(self.catalog.user_by_email(email).await?, owner) {
                    errors.add("email", "Email already registered");
                }
            }
        }

        errors.check("birthdate", validate_birthdate(&form.birthdate, today).map(|_| ()));
        errors.check("password", validate_password(form.password.expose_secret()));

        if form.first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        }
        if form.last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        }

        let nickname = form.nickname.trim();
        if nickname.is_empty() {
            errors.add("nickname", "Nickname is required");
        } else if taken_by_other(self.catalog.user_by_nickname(nickname).await?, owner) {
            errors.add("nickname", "Nickname already taken");
        }

        Ok(errors)
    }

    // =========================================================================
    // Generators
    // =========================================================================

    /// Suggest a free nickname built from the person's names.
    ///
    /// Tries up to [`NICKNAME_ATTEMPTS`] candidates; `None` when all were
    /// taken.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when a name is blank.
    pub async fn suggest_nickname<R: Rng>(
        &self,
        rng: &mut R,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<String>, AppError> {
        let mut errors = FieldErrors::new();
        if first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        }
        if last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        }
        errors.into_result()?;

        for _ in 0..NICKNAME_ATTEMPTS {
            let candidate = nickname_candidate(rng, first_name, last_name);
            if self.catalog.user_by_nickname(&candidate).await?.is_none() {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

/// A random password that the registration form accepts.
#[must_use]
pub fn generate_password() -> String {
    homestore_core::generate_password(&mut rand::rng())
}

fn taken_by_other(found: Option<User>, owner: Option<UserId>) -> bool {
    found.is_some_and(|user| Some(user.id) != owner)
}
