//! Scoring module - classic line-clear scoring and level progression
//!
//! Points per clear: {1: 40, 2: 100, 3: 300, 4: 1200} x level. Level is
//! derived from total lines (one level per 10 lines, starting at 1) and the
//! gravity interval is derived from the level; neither is settable on its
//! own.

use crate::types::{DROP_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_POINTS};

/// Points for clearing `lines` rows at once at the given level.
/// `lines` outside 1-4 scores nothing (no other counts are possible per lock).
pub fn line_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_POINTS.len() {
        return 0;
    }
    LINE_POINTS[lines] * level
}

/// Level for a total line count (1-based; +1 every 10 lines)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: base minus 100ms per level gained,
/// floored at 100ms (reached at level 10 with the reference base of 1000ms)
pub fn drop_interval_ms(level: u32, base_drop_ms: u32) -> u32 {
    base_drop_ms
        .saturating_sub(level.saturating_sub(1) * DROP_STEP_MS)
        .max(DROP_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_point_table() {
        assert_eq!(line_points(1, 1), 40);
        assert_eq!(line_points(2, 1), 100);
        assert_eq!(line_points(3, 1), 300);
        assert_eq!(line_points(4, 1), 1200);

        assert_eq!(line_points(1, 5), 200);
        assert_eq!(line_points(4, 3), 3600);
    }

    #[test]
    fn zero_or_impossible_counts_score_nothing() {
        assert_eq!(line_points(0, 3), 0);
        assert_eq!(line_points(5, 3), 0);
    }

    #[test]
    fn level_advances_every_ten_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn gravity_speeds_up_to_a_floor() {
        assert_eq!(drop_interval_ms(1, 1000), 1000);
        assert_eq!(drop_interval_ms(2, 1000), 900);
        assert_eq!(drop_interval_ms(10, 1000), 100);
        assert_eq!(drop_interval_ms(11, 1000), 100);
        assert_eq!(drop_interval_ms(50, 1000), 100);
    }

    #[test]
    fn gravity_respects_custom_base() {
        assert_eq!(drop_interval_ms(1, 600), 600);
        assert_eq!(drop_interval_ms(6, 600), 100);
        assert_eq!(drop_interval_ms(9, 600), 100);
    }
}
