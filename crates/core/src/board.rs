//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or tagged with the shape kind that
//! filled it. Uses a flat array for cache locality and zero-allocation copies.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Row 0 is the spawn row.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by a single clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

/// Result of [`clear_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub board: Board,
    pub lines_cleared: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow a single row, `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Fill every column of row `y` except those listed in `holes`.
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: ShapeKind) {
        for x in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer pass, no allocation
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        // Everything above the last kept row becomes fresh empty rows.
        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = None;
        }

        cleared_rows
    }

    /// Write every in-bounds occupied cell of `piece` with the piece's tag.
    /// Cells above row 0 or outside the columns are dropped.
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Copy the grid into a fixed-size row array (for snapshots).
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Build from row strings: `.` is empty, a shape letter fills the cell.
    ///
    /// Rows are bottom-aligned; missing top rows are empty. Unknown characters and
    /// excess columns are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let skip = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().rev().take(HEIGHT).rev().enumerate() {
            let y = (skip + i) as i8;
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                let mut buf = [0u8; 4];
                if let Some(kind) = ShapeKind::from_str(ch.encode_utf8(&mut buf)) {
                    board.set(x as i8, y, Some(kind));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Board of all-empty cells.
pub fn create_empty_board() -> Board {
    Board::new()
}

/// Lock `piece` into a copy of `board`; the input is left untouched.
pub fn merge_piece_to_board(piece: &Piece, board: &Board) -> Board {
    let mut merged = board.clone();
    merged.merge_piece(piece);
    merged
}

/// Remove every full row and prepend the same number of empty rows.
pub fn clear_lines(board: &Board) -> LineClear {
    let mut next = board.clone();
    let lines_cleared = next.clear_full_rows().len();
    LineClear {
        board: next,
        lines_cleared,
    }
}
