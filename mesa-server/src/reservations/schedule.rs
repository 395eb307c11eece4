//! Reservation window math

/// Every reservation lasts exactly two hours
pub const RESERVATION_DURATION_MS: i64 = 2 * 60 * 60 * 1000;

/// End of the window starting at `start_at`; `None` past the i64 range
pub const fn end_for(start_at: i64) -> Option<i64> {
    start_at.checked_add(RESERVATION_DURATION_MS)
}

/// Half-open intervals `[a_start, a_end)` and `[b_start, b_end)` share time
pub const fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;

    #[test]
    fn window_is_two_hours() {
        assert_eq!(end_for(19 * HOUR), Some(21 * HOUR));
    }

    #[test]
    fn window_end_out_of_range() {
        assert_eq!(end_for(i64::MAX - HOUR), None);
        assert_eq!(end_for(i64::MAX - 2 * HOUR), Some(i64::MAX));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        assert!(!overlaps(19 * HOUR, 21 * HOUR, 21 * HOUR, 23 * HOUR));
        assert!(!overlaps(21 * HOUR, 23 * HOUR, 19 * HOUR, 21 * HOUR));
    }

    #[test]
    fn shared_time_overlaps() {
        assert!(overlaps(19 * HOUR, 21 * HOUR, 20 * HOUR, 22 * HOUR));
        assert!(overlaps(19 * HOUR, 21 * HOUR, 19 * HOUR, 21 * HOUR));
        assert!(overlaps(19 * HOUR, 21 * HOUR, 18 * HOUR, 22 * HOUR));
        assert!(overlaps(20 * HOUR, 22 * HOUR, 19 * HOUR, 21 * HOUR));
    }

    #[test]
    fn overlap_is_symmetric() {
        let windows = [(0, 2), (1, 3), (2, 4), (5, 7)];
        for (a0, a1) in windows {
            for (b0, b1) in windows {
                assert_eq!(overlaps(a0, a1, b0, b1), overlaps(b0, b1, a0, a1));
            }
        }
    }
}
