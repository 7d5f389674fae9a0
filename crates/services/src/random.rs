//! Bounded random integer helpers.

use rand::Rng;

use crate::error::GeneratorError;

/// Draws tried before falling back to picking among the remaining candidates directly.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Uniform integer in the inclusive range `[min, max]`.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidRange` if `min > max`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> Result<u32, GeneratorError> {
    if min > max {
        return Err(GeneratorError::InvalidRange { min, max });
    }
    Ok(rng.random_range(min..=max))
}

/// Uniform integer in `[min, max]` that is not in `excluded`.
///
/// Uses rejection sampling for up to `MAX_REJECTION_ATTEMPTS` draws, then picks
/// uniformly among the values that remain.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidRange` if `min > max`.
/// Returns `GeneratorError::RangeExhausted` if `excluded` covers the whole range.
pub fn random_int_excluding<R: Rng + ?Sized>(
    rng: &mut R,
    min: u32,
    max: u32,
    excluded: &[u32],
) -> Result<u32, GeneratorError> {
    if min > max {
        return Err(GeneratorError::InvalidRange { min, max });
    }

    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let candidate = rng.random_range(min..=max);
        if !excluded.contains(&candidate) {
            return Ok(candidate);
        }
    }

    let mut blocked: Vec<u32> = excluded
        .iter()
        .copied()
        .filter(|v| (min..=max).contains(v))
        .collect();
    blocked.sort_unstable();
    blocked.dedup();

    let span = u64::from(max - min) + 1;
    let available = span - blocked.len() as u64;
    if available == 0 {
        return Err(GeneratorError::RangeExhausted { min, max });
    }

    log::warn!(
        "rejection sampling gave up on [{min}, {max}] with {} exclusions; scanning",
        blocked.len()
    );
    let index = rng.random_range(0..available);
    nth_remaining(min, max, &blocked, index)
}

/// The `index`-th value (0-based) of `[min, max]` once `blocked` is removed.
///
/// `blocked` must be sorted, deduplicated and inside the range.
fn nth_remaining(min: u32, max: u32, blocked: &[u32], index: u64) -> Result<u32, GeneratorError> {
    let mut value = u64::from(min) + index;
    for &b in blocked {
        if u64::from(b) <= value {
            value += 1;
        } else {
            break;
        }
    }
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(GeneratorError::RangeExhausted { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn single_value_range_returns_it() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_int(&mut rng, 7, 7), Ok(7));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            random_int(&mut rng, 5, 4),
            Err(GeneratorError::InvalidRange { min: 5, max: 4 })
        );
        assert_eq!(
            random_int_excluding(&mut rng, 5, 4, &[]),
            Err(GeneratorError::InvalidRange { min: 5, max: 4 })
        );
    }

    #[test]
    fn draws_stay_in_range_and_cover_it() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let v = random_int(&mut rng, 3, 8).unwrap();
            assert!((3..=8).contains(&v));
            seen.insert(v);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn excluded_values_never_appear() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let v = random_int_excluding(&mut rng, 1, 5, &[2, 4]).unwrap();
            assert!(matches!(v, 1 | 3 | 5));
        }
    }

    #[test]
    fn full_exclusion_reports_exhaustion() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            random_int_excluding(&mut rng, 1, 3, &[3, 1, 2, 2, 99]),
            Err(GeneratorError::RangeExhausted { min: 1, max: 3 })
        );
    }

    #[test]
    fn single_remaining_candidate_is_found() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert_eq!(random_int_excluding(&mut rng, 0, 4, &[0, 1, 3, 4]), Ok(2));
        }
    }

    #[test]
    fn nth_remaining_skips_blocked_values() {
        let blocked = [2, 3, 6];
        let picked: Vec<u32> = (0..5)
            .map(|i| nth_remaining(1, 8, &blocked, i).unwrap())
            .collect();
        assert_eq!(picked, vec![1, 4, 5, 7, 8]);
    }
}
