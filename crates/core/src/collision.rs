//! Collision and transform engine
//!
//! [`check_collision`] is the single predicate every move, rotation and drop consults.
//! Nothing here mutates a board or a piece in place.

use crate::board::Board;
use crate::pieces::{Matrix, Piece};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if any occupied cell of `piece` is outside columns `0..WIDTH`, at or below row
/// `HEIGHT`, or overlaps an occupied board cell.
///
/// Cells above the board (negative rows) skip the overlap check but are still
/// bounds-checked horizontally, so a piece may spawn partially above row 0.
pub fn check_collision(piece: &Piece, board: &Board) -> bool {
    piece.cells().any(|(x, y)| {
        x < 0
            || x >= BOARD_WIDTH as i8
            || y >= BOARD_HEIGHT as i8
            || (y >= 0 && board.is_occupied(x, y))
    })
}

/// 90° clockwise rotation of `matrix`.
pub fn rotate_matrix(matrix: &Matrix) -> Matrix {
    matrix.rotated_cw()
}

/// Outcome of a successful [`try_rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub piece: Piece,
    /// Column offset that made the rotation fit (0 when no kick was needed).
    pub kick: i8,
}

/// Rotate `piece` clockwise, trying its shape's kick offsets in order if the rotated
/// matrix collides in place.
///
/// Returns `None` when every candidate collides; the caller keeps the original piece.
pub fn try_rotate(piece: &Piece, board: &Board) -> Option<Rotated> {
    let rotated = piece.with_matrix(rotate_matrix(&piece.matrix));

    std::iter::once(0)
        .chain(piece.kicks().iter().copied())
        .map(|kick| Rotated {
            piece: rotated.translated(kick, 0),
            kick,
        })
        .find(|candidate| !check_collision(&candidate.piece, board))
}

/// Rows `piece` can fall before it would collide.
pub fn drop_distance(piece: &Piece, board: &Board) -> i8 {
    // A matrix with no occupied cells never collides; cap the search.
    let limit = BOARD_HEIGHT as i8 * 2;
    let mut distance = 0;
    while distance < limit && !check_collision(&piece.translated(0, distance + 1), board) {
        distance += 1;
    }
    distance
}

/// `piece` moved straight down as far as it can go.
pub fn landing_position(piece: &Piece, board: &Board) -> Piece {
    piece.translated(0, drop_distance(piece, board))
}
