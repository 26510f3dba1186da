//! Core types for Homestore.
//!
//! This module provides type-safe wrappers and rules for common domain
//! concepts.

pub mod birthdate;
pub mod email;
pub mod id;
pub mod nickname;
pub mod password;
pub mod phone;
pub mod price;
pub mod role;

pub use birthdate::{BirthdateError, MIN_ACCOUNT_AGE, age_on, validate_birthdate};
pub use email::{Email, EmailError};
pub use id::*;
pub use nickname::{NICKNAME_ATTEMPTS, nickname_candidate};
pub use password::{PasswordError, generate_password, validate_password};
pub use phone::{LoginId, Phone, PhoneError};
pub use price::{Price, PriceError};
pub use role::Role;
