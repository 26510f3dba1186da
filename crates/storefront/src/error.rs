//! Unified error handling for storefront operations.
//!
//! Services return `Result<T, AppError>`. Pages catch the error, log it and
//! turn it into an [`crate::pages::Alert`]; nothing is fatal.

use homestore_core::FieldErrors;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::models::SessionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog service call failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session file could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// No user is logged in.
    #[error("Unauthorized, please log in")]
    Unauthorized,

    /// The logged-in user may not do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form input was rejected; one message per offending field.
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl AppError {
    /// Message shown to the user.
    ///
    /// Infrastructure failures get a generic message; their details only go
    /// to the log.
    #[must_use]
    pub fn alert(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => "Not found".to_string(),
            Self::Catalog(_) => "The store is unavailable right now, please try again".to_string(),
            Self::Session(_) => "Could not access your session".to_string(),
            Self::Unauthorized => "Please log in to continue".to_string(),
            Self::Forbidden(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Validation(errors) => errors
                .iter()
                .map(|(_, message)| message)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Whether the error is an infrastructure failure worth an `error!` log
    /// rather than an expected refusal.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => false,
            Self::Catalog(_) | Self::Session(_) => true,
            _ => false,
        }
    }

    /// Map a catalog `NotFound` to [`AppError::NotFound`] with `message`.
    pub(crate) fn not_found_as(err: CatalogError, message: &str) -> Self {
        match err {
            CatalogError::NotFound(_) => Self::NotFound(message.to_string()),
            other => Self::Catalog(other),
        }
    }
}
