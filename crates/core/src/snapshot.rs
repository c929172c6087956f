use crate::gate::FallingGate;
use crate::types::{GamePhase, GateType};

/// Read-only view of one gate for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSnapshot {
    pub id: u32,
    pub kind: GateType,
    pub x: f32,
    pub y: f32,
    pub active: bool,
    pub hit: bool,
}

impl From<&FallingGate> for GateSnapshot {
    fn from(value: &FallingGate) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            x: value.x,
            y: value.y,
            active: value.active,
            hit: value.hit,
        }
    }
}

/// Per-game counters shown on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameStats {
    pub spawned: u32,
    pub hits: u32,
    pub misses: u32,
    pub wrong_keys: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub revision: u64,
    pub clock_ms: u64,
    pub seed: u32,
    pub entities: Vec<GateSnapshot>,
    pub stats: GameStats,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            revision: 0,
            clock_ms: 0,
            seed: 0,
            entities: Vec::new(),
            stats: GameStats::default(),
        }
    }
}
