//! Scoring module - line-clear points, solo leveling and fall speed
//!
//! - Points for a lock are `SCORE_PER_LINE[lines] * scoring_level`.
//! - The scoring level is the current level in solo and a fixed 1 in duo.
//! - Only solo advances cumulative lines and levels.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::types::{GameMode, SCORE_PER_LINE, STARTING_LEVEL};

/// Points for clearing `lines` rows with one lock.
///
/// More than four rows can only come from a hand-built board; they score as four.
pub fn line_clear_points(lines: usize, scoring_level: u32) -> u32 {
    let base = SCORE_PER_LINE[lines.min(SCORE_PER_LINE.len() - 1)];
    base.saturating_mul(scoring_level)
}

/// Level multiplier used when scoring a clear.
pub fn scoring_level(mode: GameMode, level: u32) -> u32 {
    match mode {
        GameMode::Solo => level,
        GameMode::Duo => STARTING_LEVEL,
    }
}

/// Level after reaching `total_lines`, starting from `level`.
///
/// Levels up while `total_lines >= level * lines_per_level`, so a big jump in lines can
/// advance several levels at once. Never decreases.
pub fn level_after_lines(level: u32, total_lines: u32, lines_per_level: u32) -> u32 {
    let mut level = level.max(STARTING_LEVEL);
    if lines_per_level == 0 {
        return level;
    }
    while total_lines >= level.saturating_mul(lines_per_level) {
        level += 1;
    }
    level
}

/// Solo fall interval at `level`: `max(min, base - (level - 1) * step)`.
///
/// The subtraction uses the level being left, so level 2 runs at `base - step`.
pub fn fall_interval_for_level(config: &EngineConfig, level: u32) -> Duration {
    let steps = level.saturating_sub(STARTING_LEVEL);
    let reduction = steps.saturating_mul(config.fall_interval_step_ms);
    let ms = config
        .base_fall_interval_ms
        .saturating_sub(reduction)
        .max(config.min_fall_interval_ms);
    Duration::from_millis(u64::from(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);

        assert_eq!(line_clear_points(1, 3), 300);
        assert_eq!(line_clear_points(4, 5), 4000);
        assert_eq!(line_clear_points(6, 1), 800);
    }

    #[test]
    fn test_scoring_level() {
        assert_eq!(scoring_level(GameMode::Solo, 4), 4);
        assert_eq!(scoring_level(GameMode::Duo, 4), 1);
    }

    #[test]
    fn test_level_after_lines() {
        assert_eq!(level_after_lines(1, 0, 10), 1);
        assert_eq!(level_after_lines(1, 9, 10), 1);
        assert_eq!(level_after_lines(1, 10, 10), 2);
        assert_eq!(level_after_lines(2, 19, 10), 2);
        assert_eq!(level_after_lines(2, 20, 10), 3);
        assert_eq!(level_after_lines(1, 35, 10), 4);
        assert_eq!(level_after_lines(1, 100, 0), 1);
    }

    #[test]
    fn test_fall_interval_for_level() {
        let config = EngineConfig::default();
        assert_eq!(fall_interval_for_level(&config, 1), Duration::from_millis(1000));
        assert_eq!(fall_interval_for_level(&config, 2), Duration::from_millis(950));
        assert_eq!(fall_interval_for_level(&config, 10), Duration::from_millis(550));
        assert_eq!(fall_interval_for_level(&config, 19), Duration::from_millis(100));
        assert_eq!(fall_interval_for_level(&config, 50), Duration::from_millis(100));
    }
}
