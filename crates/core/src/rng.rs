//! RNG module - seeded random source for spawns
//!
//! Spawns draw a gate kind uniformly from the seven-symbol vocabulary and a
//! horizontal position uniformly from the spawn band. A small LCG keeps every
//! game reproducible from its seed.

use crate::types::{GateType, SPAWN_X_MAX, SPAWN_X_MIN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }

    /// Uniform float in [0, 1)
    pub fn next_unit(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform gate kind
    pub fn next_gate(&mut self) -> GateType {
        GateType::ALL[self.next_range(GateType::ALL.len() as u32) as usize]
    }

    /// Uniform spawn column in [SPAWN_X_MIN, SPAWN_X_MAX)
    pub fn next_spawn_x(&mut self) -> f32 {
        SPAWN_X_MIN + self.next_unit() * (SPAWN_X_MAX - SPAWN_X_MIN)
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
