//! Belarus mobile phone numbers.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `+375`, an operator code (29, 33, 44, 25), then seven digits. Spaces,
/// parentheses around the operator code and dashes are optional.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // static pattern
    Regex::new(r"^\+375\s?\(?(?:29|33|44|25)\)?\s?\d{3}-?\d{2}-?\d{2}$").unwrap()
});

/// Error returned for numbers outside the accepted format.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Phone must be in Belarus format: +375 (XX) XXX-XX-XX")]
pub struct PhoneError;

/// A phone number, kept exactly as entered.
///
/// The catalog service matches users by the literal string, so no
/// normalization is applied.
///
/// ```
/// use homestore_core::Phone;
///
/// assert!(Phone::parse("+375 (29) 123-45-67").is_ok());
/// assert!(Phone::parse("+375291234567").is_ok());
/// assert!(Phone::parse("+375 (17) 123-45-67").is_err()); // landline code
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError`] if the input does not match the Belarus format.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if PHONE_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError)
        }
    }

    /// Returns the number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A login identifier: either a phone number or an e-mail address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginId {
    /// Matched the phone format.
    Phone(Phone),
    /// Matched the e-mail format.
    Email(crate::Email),
}

impl LoginId {
    /// Classify a login string.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the input is neither a phone number
    /// nor an e-mail address.
    pub fn parse(s: &str) -> Result<Self, &'static str> {
        if let Ok(phone) = Phone::parse(s) {
            return Ok(Self::Phone(phone));
        }
        crate::Email::parse(s)
            .map(Self::Email)
            .map_err(|_| "Enter a valid Belarus phone number (+375 XX XXX-XX-XX) or email")
    }

    /// The raw login string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Phone(p) => p.as_str(),
            Self::Email(e) => e.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_layouts() {
        for ok in [
            "+375 (29) 123-45-67",
            "+375(33)1234567",
            "+375 44 123-45-67",
            "+375251234567",
        ] {
            assert!(Phone::parse(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_rejected_layouts() {
        for bad in ["", "375291234567", "+375 (29) 123-45-6", "+375 (30) 123-45-67", "+7 (29) 123-45-67"] {
            assert_eq!(Phone::parse(bad), Err(PhoneError), "{bad}");
        }
    }

    #[test]
    fn test_login_id_classification() {
        assert!(matches!(LoginId::parse("+375291234567"), Ok(LoginId::Phone(_))));
        assert!(matches!(LoginId::parse("a@b.by"), Ok(LoginId::Email(_))));
        assert!(LoginId::parse("nobody").is_err());
    }
}
