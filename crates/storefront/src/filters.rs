//! Display helpers shared by page view-models and front ends.

use chrono::{DateTime, Utc};

const FULL_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Five stars with `rating` of them filled, e.g. `★★★☆☆`.
///
/// Ratings above 5 fill all five.
#[must_use]
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    std::iter::repeat_n(FULL_STAR, filled)
        .chain(std::iter::repeat_n(EMPTY_STAR, 5 - filled))
        .collect()
}

/// Stars for a product's mean rating, rounded to the nearest whole star.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rating_stars(rating: f64) -> String {
    let rounded = rating.round().clamp(0.0, 5.0) as u8;
    stars(rounded)
}

/// A mean rating with one decimal place, e.g. `4.5`.
#[must_use]
pub fn rating_label(rating: f64) -> String {
    format!("{rating:.1}")
}

/// Date shown under a review, `16.10.2026`.
#[must_use]
pub fn review_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_rating_stars_round() {
        assert_eq!(rating_stars(4.5), "★★★★★");
        assert_eq!(rating_stars(4.4), "★★★★☆");
        assert_eq!(rating_stars(-1.0), "☆☆☆☆☆");
        assert_eq!(rating_label(4.26), "4.3");
        assert_eq!(rating_label(0.0), "0.0");
    }

    #[test]
    fn test_review_date() {
        let date = Utc.with_ymd_and_hms(2026, 3, 7, 18, 30, 0).unwrap();
        assert_eq!(review_date(date), "07.03.2026");
    }
}
