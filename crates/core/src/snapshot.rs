//! Read-only view of a session for renderers and front ends.
//!
//! Everything is inline and `Copy`, so a host can keep one snapshot around and refill it
//! with `GameSession::snapshot_into` every frame without allocating.

use crate::pieces::{Matrix, Piece};
use crate::types::{Cell, GameMode, SessionState, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .occupied()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells only; the active piece is not merged in.
    pub board: [[Cell; WIDTH]; HEIGHT],
    pub active: Option<PieceSnapshot>,
    /// Row the active piece would land on with a hard drop.
    pub ghost_y: Option<i8>,
    pub next: Option<ShapeKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub time_remaining_secs: u32,
    pub fall_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub mode: Option<GameMode>,
    pub state: SessionState,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Cell as a renderer would draw it: the active piece over locked cells.
    pub fn visible_cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        if let Some(active) = &self.active {
            if active.cells().any(|cell| cell == (x, y)) {
                return Some(active.kind);
            }
        }
        self.board[y as usize][x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; WIDTH]; HEIGHT],
            active: None,
            ghost_y: None,
            next: None,
            score: 0,
            level: 0,
            lines: 0,
            time_remaining_secs: 0,
            fall_interval_ms: 0,
            paused: false,
            game_over: false,
            mode: None,
            state: SessionState::NotStarted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_playable() {
        let snap = GameSnapshot::default();
        assert!(!snap.playable());
        assert_eq!(snap.state, SessionState::NotStarted);
        assert!(snap.board.iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_visible_cell_overlays_active_piece() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(ShapeKind::Z);
        snap.active = Some(Piece::spawn(ShapeKind::O).into());

        assert_eq!(snap.visible_cell(4, 0), Some(ShapeKind::O));
        assert_eq!(snap.visible_cell(5, 1), Some(ShapeKind::O));
        assert_eq!(snap.visible_cell(0, 19), Some(ShapeKind::Z));
        assert_eq!(snap.visible_cell(3, 0), None);
        assert_eq!(snap.visible_cell(-1, 0), None);
        assert_eq!(snap.visible_cell(0, 20), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut snap = GameSnapshot {
            score: 900,
            game_over: true,
            state: SessionState::GameOver,
            ..GameSnapshot::default()
        };
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }
}
