//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameCommand`]s. Invalid symbols
//! stop here: the engine only ever receives a [`crate::types::GateType`].

pub mod map;

pub use tui_gates_types as types;

pub use map::{gate_for_char, gate_for_key, handle_key_event, should_quit};
