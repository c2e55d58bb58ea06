//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and the session state machine. It has no dependency
//! on terminals, async runtimes or wall-clock time: timers go through the [`Scheduler`]
//! trait and randomness through [`PieceSource`], so a session is fully reproducible from
//! a seed and a command log.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, merging and line clearing
//! - [`pieces`]: the seven-shape catalog, occupancy matrices and the falling piece
//! - [`collision`]: collision predicate, rotation with wall kicks, drop distance
//! - [`rng`]: uniform piece selection behind the [`PieceSource`] trait
//! - [`scoring`]: line-clear points, solo leveling and fall speed
//! - [`scheduler`]: repeating timers with cancellation handles
//! - [`session`]: [`GameSession`], the controller that ties it all together
//! - [`snapshot`]: read-only view for renderers
//! - [`config`]: tunable timing and leveling values
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is drawn independently, repeats allowed
//! - **Simple rotation**: clockwise only, with per-shape horizontal kick tables
//! - **No lock delay**: a piece that cannot fall locks on the next fall tick
//! - **Solo**: level rises every 10 lines and the fall interval shrinks by 50ms per level
//! - **Duo**: fixed fall speed and a 30 second countdown that ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{GameAction, GameMode};
//!
//! let mut game = GameSession::seeded(12345);
//! game.start_game(GameMode::Duo);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.time_remaining_secs, 30);
//! assert!(snap.board.iter().flatten().any(|cell| cell.is_some()));
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_lines, create_empty_board, merge_piece_to_board, Board, LineClear};
pub use collision::{check_collision, landing_position, rotate_matrix, try_rotate};
pub use config::EngineConfig;
pub use pieces::{shape, Matrix, Piece, Shape};
pub use rng::{get_random_piece, FixedSequence, PieceSource, Randomizer, SimpleRng};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerKind, TimerTable};
pub use session::{GameSession, LockEvent};
pub use snapshot::{GameSnapshot, PieceSnapshot};
