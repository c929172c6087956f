//! Core types module - shared vocabulary and rule constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no external dependencies, making them usable
//! from the engine, the input mapper and the terminal view alike.
//!
//! # Play Field
//!
//! Positions are percentages of the play field:
//!
//! - **x**: 10..90 (fixed at spawn)
//! - **y**: 0 at the top, grows every tick; a gate that passes `GAME_HEIGHT`
//!   (80) without being matched is missed
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed timestep interval |
//! | `SPAWN_BASE_MS` | 2000 | Spawn cadence at level 0 |
//! | `SPAWN_STEP_MS` | 100 | Cadence reduction per level |
//! | `SPAWN_INTERVAL_FLOOR_MS` | 250 | Minimum spawn cadence |
//! | `HIT_LINGER_MS` | 500 | How long a matched gate stays visible |
//! | `LAST_KEY_FLASH_MS` | 300 | How long the pressed-key indicator shows |
//!
//! # Scoring
//!
//! | Event | Points |
//! |-------|--------|
//! | Match | +10 (`SCORE_INCREMENT`) |
//! | Match above 30% of `GAME_HEIGHT` | +5 extra (`EARLY_BONUS`) |
//! | Missed gate / wrong key | -5 (`MISS_PENALTY`), clamped at zero |
//!
//! Level is `score / 100 + 1` and never decreases within a game.
//!
//! # Examples
//!
//! ```
//! use tui_gates_types::{GateType, GAME_HEIGHT};
//!
//! let gate = GateType::from_str("xnor").unwrap();
//! assert_eq!(gate, GateType::Xnor);
//! assert_eq!(gate.label(), "XNOR");
//! assert_eq!(gate.key(), 'z');
//!
//! assert_eq!(GAME_HEIGHT, 80.0);
//! ```

use std::fmt;

/// Fixed timestep interval in milliseconds.
pub const TICK_MS: u32 = 50;

/// Base fall speed in field-height percent per tick.
pub const BASE_SPEED: f32 = 0.5;

/// Fractional speed increase per level.
pub const SPEED_PER_LEVEL: f32 = 0.1;

/// Gameplay floor; an unmatched gate below this line is missed.
pub const GAME_HEIGHT: f32 = 80.0;

/// Matches above `GAME_HEIGHT * EARLY_ZONE` earn the early bonus.
pub const EARLY_ZONE: f32 = 0.3;

/// Leftmost spawn position (percent of field width).
pub const SPAWN_X_MIN: f32 = 10.0;

/// Rightmost spawn position (percent of field width).
pub const SPAWN_X_MAX: f32 = 90.0;

/// Points for a correct match.
pub const SCORE_INCREMENT: u32 = 10;

/// Extra points for matching inside the early zone.
pub const EARLY_BONUS: u32 = 5;

/// Points lost for a missed gate or a wrong key.
pub const MISS_PENALTY: u32 = 5;

/// Score needed per level step.
pub const POINTS_PER_LEVEL: u32 = 100;

/// On-screen gate cap is `level + ENTITY_CAP_OFFSET`.
pub const ENTITY_CAP_OFFSET: u32 = 2;

/// Spawn cadence before level scaling.
pub const SPAWN_BASE_MS: u32 = 2000;

/// Spawn cadence reduction per level.
pub const SPAWN_STEP_MS: u32 = 100;

/// Spawn cadence never drops below this.
pub const SPAWN_INTERVAL_FLOOR_MS: u32 = 250;

/// A matched gate stays visible this long before it is evicted.
pub const HIT_LINGER_MS: u32 = 500;

/// The pressed-key indicator clears after this long.
pub const LAST_KEY_FLASH_MS: u32 = 300;

/// The seven logic gate kinds
///
/// Each gate has a label, a compact IEC-style symbol and one key:
/// - **AND** `&` (a)
/// - **OR** `≥1` (o)
/// - **NOT** `1` with an inversion bubble (n)
/// - **XOR** `=1` (x)
/// - **NAND** `&` inverted (d)
/// - **NOR** `≥1` inverted (r)
/// - **XNOR** `=1` inverted (z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateType {
    And,
    Or,
    Not,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl GateType {
    /// Every gate kind, in legend order.
    pub const ALL: [GateType; 7] = [
        GateType::And,
        GateType::Or,
        GateType::Not,
        GateType::Xor,
        GateType::Nand,
        GateType::Nor,
        GateType::Xnor,
    ];

    /// Parse a gate from its label (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gates_types::GateType;
    ///
    /// assert_eq!(GateType::from_str("and"), Some(GateType::And));
    /// assert_eq!(GateType::from_str("NoR"), Some(GateType::Nor));
    /// assert_eq!(GateType::from_str("mux"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "and" => Some(GateType::And),
            "or" => Some(GateType::Or),
            "not" => Some(GateType::Not),
            "xor" => Some(GateType::Xor),
            "nand" => Some(GateType::Nand),
            "nor" => Some(GateType::Nor),
            "xnor" => Some(GateType::Xnor),
            _ => None,
        }
    }

    /// Upper-case display label
    pub fn label(&self) -> &'static str {
        match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Not => "NOT",
            GateType::Xor => "XOR",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Xnor => "XNOR",
        }
    }

    /// Compact IEC 60617 symbol; a trailing `o` marks an inverted output.
    pub fn symbol(&self) -> &'static str {
        match self {
            GateType::And => "&",
            GateType::Or => "≥1",
            GateType::Not => "1o",
            GateType::Xor => "=1",
            GateType::Nand => "&o",
            GateType::Nor => "≥1o",
            GateType::Xnor => "=1o",
        }
    }

    /// The lower-case key that matches this gate.
    pub fn key(&self) -> char {
        match self {
            GateType::And => 'a',
            GateType::Or => 'o',
            GateType::Not => 'n',
            GateType::Xor => 'x',
            GateType::Nand => 'd',
            GateType::Nor => 'r',
            GateType::Xnor => 'z',
        }
    }

    /// Whether the gate's output is inverted (drawn with a bubble).
    pub fn inverted(&self) -> bool {
        matches!(
            self,
            GateType::Not | GateType::Nand | GateType::Nor | GateType::Xnor
        )
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of one game
///
/// `NotStarted --start--> Playing --penalty below zero--> GameOver --start--> Playing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == GamePhase::Playing
    }
}

/// Notification emitted by the engine.
///
/// Observational only: dropping these never affects game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Hit { kind: GateType, points: u32 },
    Missed { kind: GateType },
    WrongKey { kind: GateType },
    LevelUp { level: u32 },
    GameOver { score: u32 },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Started => f.write_str("Go!"),
            GameEvent::Hit { kind, points } => write!(f, "Hit {}! +{} points", kind, points),
            GameEvent::Missed { kind } => write!(f, "Missed {}! -{} points", kind, MISS_PENALTY),
            GameEvent::WrongKey { .. } => write!(f, "Wrong key! -{} points", MISS_PENALTY),
            GameEvent::LevelUp { level } => write!(f, "Level up! Now level {}", level),
            GameEvent::GameOver { score } => write!(f, "Game Over! Your score: {}", score),
        }
    }
}

/// Commands the presentation layer may send to a session.
///
/// Tick and spawn come from the scheduler, never from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Start a new game (or restart after game over)
    Start,
    /// A gate key was pressed
    Press(GateType),
}
