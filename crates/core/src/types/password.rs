//! Account password rules and generation.
//!
//! The catalog service stores passwords as given; these rules only decide
//! what the registration and profile forms accept.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Characters a password may contain.
pub const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789@$!%*?&";

/// Special characters; at least one is required.
const SPECIALS: &str = "@$!%*?&";

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// Passwords that satisfy the character rules but are refused anyway.
pub const COMMON_PASSWORDS: &[&str] = &[
    "Password123!",
    "Qwerty123$",
    "Admin2024#",
    "12345678aA!",
    "Password2024!",
    "Qwertyuiop1@",
    "Welcome123#",
    "Secret2024$",
];

/// Reasons a password is refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    /// Length, alphabet or character-class rule violated.
    #[error(
        "Password must be 8-20 characters, include uppercase, lowercase, digit, and special character"
    )]
    Weak,
    /// Listed in [`COMMON_PASSWORDS`].
    #[error("Password is too common")]
    Common,
}

/// Check a password against the account rules.
///
/// # Errors
///
/// Returns [`PasswordError::Weak`] when the length, alphabet or any required
/// character class is missing, and [`PasswordError::Common`] for well-known
/// passwords.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    let in_alphabet = password.bytes().all(|b| PASSWORD_ALPHABET.contains(&b));
    let strong = (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len)
        && in_alphabet
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIALS.contains(c));

    if !strong {
        return Err(PasswordError::Weak);
    }
    if COMMON_PASSWORDS.contains(&password) {
        return Err(PasswordError::Common);
    }
    Ok(())
}

/// Generate a random password that passes [`validate_password`].
pub fn generate_password<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH);
    loop {
        let candidate: String = (0..len)
            .filter_map(|_| PASSWORD_ALPHABET.choose(rng).map(|&b| char::from(b)))
            .collect();
        if validate_password(&candidate).is_ok() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_valid_password() {
        assert_eq!(validate_password("Sofa@2025oak"), Ok(()));
    }

    #[test]
    fn test_missing_classes_are_weak() {
        for weak in [
            "alllowercase1!",
            "ALLUPPER1!",
            "NoDigits!!",
            "NoSpecial123",
            "Ab1!",
            "Abcdefgh1!Abcdefgh1!x",
            "Abc def1!",
        ] {
            assert_eq!(validate_password(weak), Err(PasswordError::Weak), "{weak}");
        }
    }

    #[test]
    fn test_common_password_refused() {
        assert_eq!(validate_password("Password123!"), Err(PasswordError::Common));
    }

    #[test]
    fn test_generated_passwords_validate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let password = generate_password(&mut rng);
            assert_eq!(validate_password(&password), Ok(()), "{password}");
        }
    }
}
