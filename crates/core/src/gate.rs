//! A single falling gate.

use crate::types::{GateType, GAME_HEIGHT, HIT_LINGER_MS};

/// One glyph in flight.
///
/// `x` is fixed at spawn; `y` grows by `speed` every tick. Once matched the gate
/// is `hit`, stamped with the simulation time and evicted by the engine after
/// [`HIT_LINGER_MS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingGate {
    pub id: u32,
    pub kind: GateType,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub active: bool,
    pub hit: bool,
    pub hit_at_ms: Option<u64>,
}

impl FallingGate {
    /// Create a gate at the top of the field
    pub fn new(id: u32, kind: GateType, x: f32, speed: f32) -> Self {
        Self {
            id,
            kind,
            x,
            y: 0.0,
            speed,
            active: false,
            hit: false,
            hit_at_ms: None,
        }
    }

    /// Move down by one tick's worth of travel
    pub fn advance(&mut self) {
        self.y += self.speed;
    }

    pub fn mark_hit(&mut self, now_ms: u64) {
        self.active = true;
        self.hit = true;
        self.hit_at_ms = Some(now_ms);
    }

    /// Unmatched and past the gameplay floor
    pub fn is_missed(&self) -> bool {
        !self.hit && self.y > GAME_HEIGHT
    }

    /// Matched and shown long enough
    pub fn linger_elapsed(&self, now_ms: u64) -> bool {
        match self.hit_at_ms {
            Some(at) => now_ms.saturating_sub(at) >= HIT_LINGER_MS as u64,
            None => false,
        }
    }
}
