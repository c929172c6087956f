//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout frameworks and instead renders into a simple framebuffer that
//! is flushed to the terminal as full or diffed frames.
//!
//! - [`game_view`] turns a snapshot into cells (pure, unit-tested)
//! - [`renderer`] owns the terminal and writes only what changed
//! - [`toast`] keeps the short-lived notification feed

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod toast;

pub use tui_gates_core as core;
pub use tui_gates_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use toast::{Toast, ToastKind, Toasts, DEFAULT_TOAST_TTL_MS, MAX_TOASTS};
