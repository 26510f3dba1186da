//! Subcommand implementations.
//!
//! Each command drives one storefront page controller and prints what it
//! returns. Error alerts become [`CliError::Refused`] so the process exits
//! non-zero.

pub mod account;
pub mod admin;
pub mod cart;
pub mod favorites;
pub mod product;
pub mod shop;

use homestore_storefront::AppError;
use homestore_storefront::pages::Alert;
use thiserror::Error;

use crate::render;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storefront showed an error alert.
    #[error("{0}")]
    Refused(String),

    /// A page could not be shown.
    #[error("{}", .0.alert())]
    App(#[from] AppError),

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Print an alert; error alerts fail the command.
pub(crate) fn report(alert: &Alert) -> Result<(), CliError> {
    if alert.is_error() {
        return Err(CliError::Refused(alert.message.clone()));
    }
    render::alert(&mut std::io::stdout().lock(), alert)?;
    Ok(())
}
