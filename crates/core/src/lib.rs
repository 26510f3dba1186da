//! Homestore Core - Shared types library.
//!
//! This crate provides the types used across all Homestore components:
//! - `storefront` - Catalog service client, session store and page controllers
//! - `cli` - The `hs` terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types and validation rules - no I/O, no HTTP
//! clients. Checks that need the catalog service (e.g. "is this e-mail already
//! registered?") live in the storefront crate and build on the format checks
//! here.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, contact details, passwords and roles
//! - [`models`] - Records stored by the catalog service
//! - [`validation`] - Field error collection for forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::FieldErrors;
