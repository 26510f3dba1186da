//! Client-local models for storefront.

pub mod session;

pub use session::{Session, SessionError, SessionStore};
