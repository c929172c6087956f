//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the falling-gate game: spawning, movement,
//! matching, scoring, levels and the game-over policy. It has **zero
//! dependencies** on UI, timers or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical spawns
//! - **Testable**: Every rule can be driven step by step with simulated time
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`game_state`]: Complete game state and its four transitions
//! - [`gate`]: A single falling gate and its lifetime rules
//! - [`rng`]: Seeded random source for spawns
//! - [`scoring`]: Points, penalties and level-derived difficulty
//! - [`snapshot`]: Read-only state for the presentation layer
//!
//! # Game Rules
//!
//! - **Spawn**: one gate of a random kind at a random column, capped at
//!   `level + 2` gates on screen
//! - **Tick**: every gate falls by its speed; an unmatched gate past the floor
//!   costs 5 points, a matched one disappears 500ms after the match
//! - **Input**: the lowest unmatched gate of the pressed kind is matched for
//!   10 points (15 if still near the top); no such gate costs 5 points
//! - **Game over**: a penalty that would take the score below zero
//!
//! # Example
//!
//! ```
//! use tui_gates_core::{GameState, InputOutcome};
//! use tui_gates_types::{GamePhase, TICK_MS};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! let id = game.spawn().unwrap();
//! game.tick(TICK_MS);
//!
//! let kind = game.entities()[0].kind;
//! let outcome = game.handle_input(kind);
//! assert_eq!(outcome, InputOutcome::Hit { id, points: 15 });
//! assert_eq!(game.score(), 15);
//! assert_eq!(game.phase(), GamePhase::Playing);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every `TICK_MS`
//! (50ms) and [`GameState::spawn`](game_state::GameState::spawn) every
//! [`GameState::spawn_interval_ms`](game_state::GameState::spawn_interval_ms).
//! The `tui-gates-engine` crate does that scheduling.

pub mod game_state;
pub mod gate;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_gates_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, InputOutcome};
pub use gate::FallingGate;
pub use rng::SimpleRng;
pub use scoring::{
    apply_penalty, entity_cap, hit_points, level_for_score, spawn_interval_ms, speed_for_level,
    Penalty,
};
pub use snapshot::{GameSnapshot, GameStats, GateSnapshot};
