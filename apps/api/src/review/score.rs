//! Match-score recomputation.
//!
//! The base score comes from the analyzer once per analysis; accepting
//! suggestions closes the remaining gap to 100 evenly across the whole
//! suggestion list. Pure function, safe to recompute on every request.

/// Current score for `accepted_count` accepted out of `total_suggestions`,
/// starting from `base_score`. Monotonic in `accepted_count`, capped at
/// 100, equal to `base_score` when nothing is accepted or there are no
/// suggestions at all.
pub fn compute_score(base_score: u8, total_suggestions: usize, accepted_count: usize) -> u8 {
    if total_suggestions == 0 {
        return base_score;
    }
    let base = f64::from(base_score);
    let per_suggestion = (100.0 - base) / total_suggestions as f64;
    let raw = (base + per_suggestion * accepted_count as f64).round();
    raw.min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suggestions_returns_base() {
        assert_eq!(compute_score(42, 0, 0), 42);
    }

    #[test]
    fn test_zero_accepted_returns_base() {
        assert_eq!(compute_score(63, 7, 0), 63);
    }

    #[test]
    fn test_even_distribution() {
        // 50 + (50/4) * 2 = 75
        assert_eq!(compute_score(50, 4, 2), 75);
    }

    #[test]
    fn test_all_accepted_reaches_100() {
        assert_eq!(compute_score(50, 4, 4), 100);
        assert_eq!(compute_score(0, 3, 3), 100);
    }

    #[test]
    fn test_capped_at_100() {
        // 95 + 2.5 * 2 = 100 exactly; rounding never pushes past the cap
        assert_eq!(compute_score(95, 2, 2), 100);
        assert_eq!(compute_score(99, 3, 3), 100);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 60 + (40/3) * 1 = 73.33 -> 73
        assert_eq!(compute_score(60, 3, 1), 73);
        // 60 + (40/3) * 2 = 86.67 -> 87
        assert_eq!(compute_score(60, 3, 2), 87);
    }

    #[test]
    fn test_monotonic_in_accepted_count() {
        for base in [0u8, 33, 67, 100] {
            for total in 1..=10usize {
                let mut prev = compute_score(base, total, 0);
                assert_eq!(prev, base);
                for accepted in 1..=total {
                    let next = compute_score(base, total, accepted);
                    assert!(next >= prev, "base={base} total={total} accepted={accepted}");
                    assert!(next <= 100);
                    prev = next;
                }
            }
        }
    }
}
