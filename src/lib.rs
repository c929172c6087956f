//! Logic Gate Challenge (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_gates::{core,engine,input,term,types}` and owns the
//! runtime configuration of the terminal binary.

pub mod config;

pub use tui_gates_core as core;
pub use tui_gates_engine as engine;
pub use tui_gates_input as input;
pub use tui_gates_term as term;
pub use tui_gates_types as types;

pub use config::AppConfig;
