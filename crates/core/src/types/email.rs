//! E-mail addresses for accounts and logins.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Local part, `@`, a domain with at least one dot; no whitespace.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // static pattern
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Why an e-mail field was refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Missing,
    #[error("Invalid email format")]
    Malformed,
}

/// An account e-mail, kept as typed.
///
/// The catalog looks users up by the literal address, so case and
/// surrounding text are not normalized beyond trimming by the caller.
///
/// ```
/// use homestore_core::Email;
///
/// assert!(Email::parse("olga@example.by").is_ok());
/// assert!(Email::parse("olga@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// # Errors
    ///
    /// Returns [`EmailError::Missing`] for blank input and
    /// [`EmailError::Malformed`] when it is not `name@domain.tld`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.trim().is_empty() {
            Err(EmailError::Missing)
        } else if EMAIL_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(EmailError::Malformed)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_store_addresses() {
        for ok in ["olga@example.by", "ivan.petrov+shop@mail.ru", "a@b.c"] {
            assert!(Email::parse(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_blank_is_missing() {
        assert_eq!(Email::parse("  "), Err(EmailError::Missing));
        assert_eq!(EmailError::Missing.to_string(), "Email is required");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["olga", "@example.by", "olga@", "olga@example", "ol ga@example.by", "o@l@example.by"] {
            assert_eq!(Email::parse(bad), Err(EmailError::Malformed), "{bad}");
        }
    }
}
