//! Birthdate and the minimum account age.

use chrono::{Datelike, NaiveDate};

/// Youngest age allowed to register.
pub const MIN_ACCOUNT_AGE: i32 = 16;

/// Reasons a birthdate is refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BirthdateError {
    /// Not a `YYYY-MM-DD` date.
    #[error("Birthdate must be a date in YYYY-MM-DD format")]
    InvalidFormat,
    /// Younger than [`MIN_ACCOUNT_AGE`].
    #[error("You must be at least 16 years old")]
    TooYoung,
}

/// Full years between `birthdate` and `today`.
///
/// A birthday that has not yet come round this year does not count.
#[must_use]
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birthdate.year();
    let before_birthday = (today.month(), today.day()) < (birthdate.month(), birthdate.day());
    if before_birthday { years - 1 } else { years }
}

/// Parse a form birthdate and check the minimum age.
///
/// # Errors
///
/// Returns [`BirthdateError::InvalidFormat`] for unparseable input and
/// [`BirthdateError::TooYoung`] when the person is under 16 on `today`.
pub fn validate_birthdate(input: &str, today: NaiveDate) -> Result<NaiveDate, BirthdateError> {
    let birthdate = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| BirthdateError::InvalidFormat)?;
    if age_on(birthdate, today) < MIN_ACCOUNT_AGE {
        return Err(BirthdateError::TooYoung);
    }
    Ok(birthdate)
}

/// Latest birthdate that still passes the age check on `today`.
#[must_use]
pub fn latest_allowed_birthdate(today: NaiveDate) -> NaiveDate {
    today
        .with_year(today.year() - MIN_ACCOUNT_AGE)
        // 29 February in a non-leap target year
        .or_else(|| NaiveDate::from_ymd_opt(today.year() - MIN_ACCOUNT_AGE, 2, 28))
        .unwrap_or(today)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_counts_birthday_this_year() {
        let today = date(2026, 10, 15);
        assert_eq!(age_on(date(2010, 10, 15), today), 16);
        assert_eq!(age_on(date(2010, 10, 16), today), 15);
        assert_eq!(age_on(date(2010, 3, 1), today), 16);
    }

    #[test]
    fn test_validate_birthdate() {
        let today = date(2026, 10, 15);
        assert_eq!(validate_birthdate("2010-10-15", today), Ok(date(2010, 10, 15)));
        assert_eq!(
            validate_birthdate("2010-10-16", today),
            Err(BirthdateError::TooYoung)
        );
        assert_eq!(
            validate_birthdate("15.10.2010", today),
            Err(BirthdateError::InvalidFormat)
        );
    }

    #[test]
    fn test_latest_allowed_birthdate_leap_day() {
        assert_eq!(latest_allowed_birthdate(date(2028, 2, 29)), date(2012, 2, 29));
        assert_eq!(latest_allowed_birthdate(date(2024, 2, 29)), date(2008, 2, 29));
        assert_eq!(latest_allowed_birthdate(date(2026, 10, 15)), date(2010, 10, 15));
        // 2100 is not a leap year
        assert_eq!(latest_allowed_birthdate(date(2116, 2, 29)), date(2100, 2, 28));
    }
}
