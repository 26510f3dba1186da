//! Homestore storefront library.
//!
//! The client side of the Homestore shop: a typed client for the catalog
//! REST service, the local login session, business services and one page
//! controller per storefront page. Front ends (the `hs` CLI, tests) drive
//! the page controllers and show what they return.
//!
//! # Modules
//!
//! - [`catalog`] - Catalog service client
//! - [`models`] - Local session record
//! - [`services`] - Cart, favorites, reviews, accounts, admin products
//! - [`pages`] - Page controllers and their view-models
//! - [`state`] - [`Storefront`] handle tying it together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod pages;
pub mod services;
pub mod state;

pub use error::AppError;
pub use state::Storefront;
