//! Pure helpers behind menu navigation and bet adjustment.

use crate::config::{BET_MAX, BET_MIN};

/// Move selection cursor one item up, wrapping to the last item.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else if selected == 0 {
        item_count - 1
    } else {
        (selected - 1).min(item_count - 1)
    }
}

/// Move selection cursor one item down, wrapping to the first item.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        0
    }
}

/// Raise the bet by one, never above `BET_MAX`.
pub fn bet_up(bet: i32) -> i32 {
    bet.saturating_add(1).clamp(BET_MIN, BET_MAX)
}

/// Lower the bet by one, never below `BET_MIN`.
pub fn bet_down(bet: i32) -> i32 {
    bet.saturating_sub(1).clamp(BET_MIN, BET_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        assert_eq!(select_prev(0, 5), 4);
        assert_eq!(select_prev(3, 5), 2);
        assert_eq!(select_next(4, 5), 0);
        assert_eq!(select_next(1, 5), 2);
    }

    #[test]
    fn empty_list_stays_at_zero() {
        assert_eq!(select_prev(0, 0), 0);
        assert_eq!(select_next(0, 0), 0);
    }

    #[test]
    fn bet_is_clamped() {
        assert_eq!(bet_up(BET_MAX), BET_MAX);
        assert_eq!(bet_down(BET_MIN), BET_MIN);
        assert_eq!(bet_up(2), 3);
        assert_eq!(bet_down(2), 1);
        assert_eq!(bet_up(i32::MAX), BET_MAX);
    }
}
