//! Nickname suggestions built from a person's names.

use rand::Rng;
use rand::seq::IndexedRandom;

/// How many suggestions a form may request before the field unlocks for
/// manual entry.
pub const NICKNAME_ATTEMPTS: u32 = 5;

const SUFFIXES: &[&str] = &["Star", "Light", "Glow", "Spark", "Flame"];

/// Build one nickname candidate.
///
/// Takes 1-3 leading characters of each name, a number in `10..=999` and,
/// half of the time, one of a few decorative suffixes. Uniqueness is checked
/// by the caller against the catalog service.
pub fn nickname_candidate<R: Rng>(rng: &mut R, first_name: &str, last_name: &str) -> String {
    let first: String = first_name.trim().chars().take(rng.random_range(1..=3)).collect();
    let last: String = last_name.trim().chars().take(rng.random_range(1..=3)).collect();
    let number: u32 = rng.random_range(10..=999);
    let suffix = if rng.random_bool(0.5) {
        SUFFIXES.choose(rng).copied().unwrap_or_default()
    } else {
        ""
    };
    format!("{first}{last}{number}{suffix}")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_candidate_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let nick = nickname_candidate(&mut rng, "Анна", "Kovalenko");
            let prefix: String = nick.chars().take_while(|c| !c.is_ascii_digit()).collect();
            let rest = &nick[prefix.len()..];
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            let suffix = &rest[digits.len()..];

            assert!(prefix.starts_with('А'), "{nick}");
            assert!(prefix.contains('K'), "{nick}");
            let number: u32 = digits.parse().unwrap_or(0);
            assert!((10..=999).contains(&number), "{nick}");
            assert!(suffix.is_empty() || SUFFIXES.contains(&suffix), "{nick}");
        }
    }
}
