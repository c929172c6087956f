//! Engine module - drives a game with simulated clocks.
//!
//! [`core`](tui_gates_core) only knows how to step a game. This crate decides
//! *when* to step it: a fixed tick, a spawn cadence that speeds up with the
//! level, and a short one-shot timer for the pressed-key indicator. Time is
//! injected through [`Scheduler::advance`], so tests run whole games without
//! sleeping and the binary feeds it wall-clock deltas.
//!
//! ```
//! use tui_gates_engine::Session;
//! use tui_gates_types::GamePhase;
//!
//! let mut session = Session::new(42);
//! session.start().unwrap();
//! session.advance(1_900).unwrap();
//!
//! assert_eq!(session.state().phase(), GamePhase::Playing);
//! assert_eq!(session.state().entities().len(), 1);
//! ```

pub mod scheduler;
pub mod session;

pub use tui_gates_core as core;
pub use tui_gates_types as types;

pub use scheduler::{Scheduler, SchedulerError, Task, TimerHandle, TimerQueue, MAX_TIMERS};
pub use session::Session;
