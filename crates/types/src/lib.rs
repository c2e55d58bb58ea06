//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, keyboard glue, rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the spawn row)
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds unless noted:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_MS` | 1000 | Solo fall interval at level 1 |
//! | `FALL_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_FALL_MS` | 100 | Fastest solo fall interval |
//! | `DUO_FALL_MS` | 1000 | Fixed duo fall interval |
//! | `DUO_TIME_LIMIT_SECS` | 30 | Duo countdown length (seconds) |
//! | `COUNTDOWN_TICK_MS` | 1000 | Duo countdown period |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, GameMode, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(GameMode::from_str("duo"), Some(GameMode::Duo));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Solo fall interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Fall interval reduction per solo level
pub const FALL_STEP_MS: u32 = 50;

/// Fastest fall interval a solo game can reach
pub const MIN_FALL_MS: u32 = 100;

/// Lines needed per solo level
pub const LINES_PER_LEVEL: u32 = 10;

/// Starting level for every session
pub const STARTING_LEVEL: u32 = 1;

/// Duo mode countdown length in seconds
pub const DUO_TIME_LIMIT_SECS: u32 = 30;

/// Fixed duo fall interval
pub const DUO_FALL_MS: u32 = BASE_FALL_MS;

/// Duo countdown period
pub const COUNTDOWN_TICK_MS: u32 = 1000;

/// Points for clearing 0..=4 lines with a single lock, before the level multiplier.
pub const SCORE_PER_LINE: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven shape kinds
///
/// The kind doubles as the colour tag stored in locked board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds, in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }

    /// Display colour as an HSL triple (hue degrees, saturation %, lightness %).
    pub fn color_hsl(&self) -> (u16, u8, u8) {
        match self {
            ShapeKind::I => (180, 70, 50),
            ShapeKind::L => (30, 100, 50),
            ShapeKind::J => (240, 70, 60),
            ShapeKind::O => (60, 100, 50),
            ShapeKind::S => (120, 70, 50),
            ShapeKind::T => (300, 70, 60),
            ShapeKind::Z => (0, 70, 60),
        }
    }
}

/// Session timing rules
///
/// - **Solo**: untimed, level-based fall-speed increase
/// - **Duo**: fixed fall speed, fixed-length countdown, no leveling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Solo,
    Duo,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "solo" => Some(GameMode::Solo),
            "duo" => Some(GameMode::Duo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Solo => "solo",
            GameMode::Duo => "duo",
        }
    }
}

/// Lifecycle of a session.
///
/// `NotStarted -> Running <-> Paused`, `Running -> GameOver`. Starting or restarting
/// re-enters `Running` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "notStarted",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameOver",
        }
    }
}

/// Commands a front end can forward to a session
///
/// Every action is total: when it does not apply to the current state it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a new session in the given mode
    Start(GameMode),
    /// Restart with the most recently selected mode
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{GameAction, GameMode};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("startDuo"), Some(GameAction::Start(GameMode::Duo)));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "startsolo" => Some(GameAction::Start(GameMode::Solo)),
            "startduo" => Some(GameAction::Start(GameMode::Duo)),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Start(GameMode::Solo) => "startSolo",
            GameAction::Start(GameMode::Duo) => "startDuo",
            GameAction::Restart => "restart",
        }
    }

    /// Whether this action moves, rotates or drops the active piece.
    pub fn is_piece_action(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::HardDrop
                | GameAction::Rotate
        )
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(ShapeKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<ShapeKind>;
