//! Scoring module - points, penalties and level-driven difficulty
//!
//! Every formula the engine uses lives here so the game loop stays readable:
//! - A match is worth `SCORE_INCREMENT`, plus `EARLY_BONUS` in the early zone.
//! - Penalties subtract `MISS_PENALTY`; dropping below zero ends the game.
//! - Level is derived from score; speed, spawn cadence and the on-screen cap
//!   are derived from level.

use crate::types::{
    BASE_SPEED, EARLY_BONUS, EARLY_ZONE, ENTITY_CAP_OFFSET, GAME_HEIGHT, MISS_PENALTY,
    POINTS_PER_LEVEL, SCORE_INCREMENT, SPAWN_BASE_MS, SPAWN_INTERVAL_FLOOR_MS, SPAWN_STEP_MS,
    SPEED_PER_LEVEL,
};

/// Points for matching a gate at height `y`.
pub fn hit_points(y: f32) -> u32 {
    if y < GAME_HEIGHT * EARLY_ZONE {
        SCORE_INCREMENT + EARLY_BONUS
    } else {
        SCORE_INCREMENT
    }
}

/// Result of subtracting one penalty from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Penalty {
    /// Score after the deduction.
    Applied(u32),
    /// The deduction would have gone below zero; the score clamps to 0.
    Exhausted,
}

pub fn apply_penalty(score: u32) -> Penalty {
    match score.checked_sub(MISS_PENALTY) {
        Some(s) => Penalty::Applied(s),
        None => Penalty::Exhausted,
    }
}

/// Level a score qualifies for (1-based).
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Fall speed for gates spawned at `level`.
pub fn speed_for_level(level: u32) -> f32 {
    BASE_SPEED * (1.0 + level as f32 * SPEED_PER_LEVEL)
}

/// Maximum gates on screen at `level`.
pub fn entity_cap(level: u32) -> usize {
    level.saturating_add(ENTITY_CAP_OFFSET) as usize
}

/// Spawn cadence at `level`, floored at [`SPAWN_INTERVAL_FLOOR_MS`].
pub fn spawn_interval_ms(level: u32) -> u32 {
    SPAWN_BASE_MS
        .saturating_sub(level.saturating_mul(SPAWN_STEP_MS))
        .max(SPAWN_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_points() {
        assert_eq!(hit_points(0.0), 15);
        assert_eq!(hit_points(10.0), 15);
        assert_eq!(hit_points(23.99), 15);
        assert_eq!(hit_points(24.0), 10);
        assert_eq!(hit_points(70.0), 10);
    }

    #[test]
    fn test_apply_penalty() {
        assert_eq!(apply_penalty(20), Penalty::Applied(15));
        assert_eq!(apply_penalty(5), Penalty::Applied(0));
        assert_eq!(apply_penalty(3), Penalty::Exhausted);
        assert_eq!(apply_penalty(0), Penalty::Exhausted);
    }

    #[test]
    fn test_level_for_score() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(99), 1);
        assert_eq!(level_for_score(100), 2);
        assert_eq!(level_for_score(250), 3);
    }

    #[test]
    fn test_speed_for_level() {
        assert!((speed_for_level(1) - 0.55).abs() < 1e-6);
        assert!((speed_for_level(10) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_entity_cap() {
        assert_eq!(entity_cap(1), 3);
        assert_eq!(entity_cap(5), 7);
    }

    #[test]
    fn test_spawn_interval_ms() {
        assert_eq!(spawn_interval_ms(1), 1900);
        assert_eq!(spawn_interval_ms(10), 1000);
        assert_eq!(spawn_interval_ms(17), 300);
        // The raw formula reaches zero at level 20 and wraps below it.
        assert_eq!(spawn_interval_ms(20), SPAWN_INTERVAL_FLOOR_MS);
        assert_eq!(spawn_interval_ms(500), SPAWN_INTERVAL_FLOOR_MS);
    }
}
