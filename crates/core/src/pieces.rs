//! Pieces module - shape catalog, occupancy matrices and the falling piece
//!
//! Shapes are stored as small binary matrices (at most 4x4) inline, so pieces are `Copy`
//! and rotating one never allocates or touches the catalog.

use crate::types::{ShapeKind, BOARD_WIDTH};

/// Largest row or column count a matrix can hold.
pub const MAX_MATRIX_DIM: usize = 4;

/// Binary occupancy matrix, `rows` x `cols`, each dimension in `1..=4`.
///
/// Cells outside `rows` x `cols` are always unoccupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_MATRIX_DIM]; MAX_MATRIX_DIM],
}

impl Matrix {
    /// Build from bit rows; the most significant of the `cols` low bits is column 0.
    const fn from_bits(rows: u8, cols: u8, bits: [u8; MAX_MATRIX_DIM]) -> Self {
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                cells[r][c] = bits[r] & (1 << (cols as usize - 1 - c)) != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, cells }
    }

    /// Build from rows of 0/1 values.
    ///
    /// Returns `None` for an empty, ragged, or larger-than-4x4 input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let cols = rows.first()?.len();
        if rows.len() > MAX_MATRIX_DIM
            || cols == 0
            || cols > MAX_MATRIX_DIM
            || rows.iter().any(|row| row.len() != cols)
        {
            return None;
        }

        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                cells[r][c] = value != 0;
            }
        }
        Some(Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Occupancy at (row, col); false outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Occupied (row, col) pairs in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r, c))
        })
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.occupied().count()
    }

    /// 90° clockwise rotation: an R x C matrix becomes C x R with
    /// `new[c][R - 1 - r] = old[r][c]`.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows();
        let mut cells = [[false; MAX_MATRIX_DIM]; MAX_MATRIX_DIM];
        for (r, c) in self.occupied() {
            cells[c][rows - 1 - r] = true;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Rows as 0/1 vectors, handy for assertions and debugging.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| self.cells[r][c] as u8).collect())
            .collect()
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub matrix: Matrix,
    /// Column offsets tried, in order, when a rotation collides in place.
    pub kicks: &'static [i8],
}

/// Kicks shared by every shape except I.
const NARROW_KICKS: &[i8] = &[1, -1];

/// I changes footprint the most between orientations and needs the two-column kicks.
const WIDE_KICKS: &[i8] = &[1, -1, 2, -2];

static SHAPES: [Shape; 7] = [
    Shape {
        kind: ShapeKind::I,
        matrix: Matrix::from_bits(1, 4, [0b1111, 0, 0, 0]),
        kicks: WIDE_KICKS,
    },
    Shape {
        kind: ShapeKind::J,
        matrix: Matrix::from_bits(2, 3, [0b100, 0b111, 0, 0]),
        kicks: NARROW_KICKS,
    },
    Shape {
        kind: ShapeKind::L,
        matrix: Matrix::from_bits(2, 3, [0b001, 0b111, 0, 0]),
        kicks: NARROW_KICKS,
    },
    Shape {
        kind: ShapeKind::O,
        matrix: Matrix::from_bits(2, 2, [0b11, 0b11, 0, 0]),
        kicks: NARROW_KICKS,
    },
    Shape {
        kind: ShapeKind::S,
        matrix: Matrix::from_bits(2, 3, [0b011, 0b110, 0, 0]),
        kicks: NARROW_KICKS,
    },
    Shape {
        kind: ShapeKind::T,
        matrix: Matrix::from_bits(2, 3, [0b010, 0b111, 0, 0]),
        kicks: NARROW_KICKS,
    },
    Shape {
        kind: ShapeKind::Z,
        matrix: Matrix::from_bits(2, 3, [0b110, 0b011, 0, 0]),
        kicks: NARROW_KICKS,
    },
];

/// Catalog lookup.
pub fn shape(kind: ShapeKind) -> &'static Shape {
    match kind {
        ShapeKind::I => &SHAPES[0],
        ShapeKind::J => &SHAPES[1],
        ShapeKind::L => &SHAPES[2],
        ShapeKind::O => &SHAPES[3],
        ShapeKind::S => &SHAPES[4],
        ShapeKind::T => &SHAPES[5],
        ShapeKind::Z => &SHAPES[6],
    }
}

/// The whole catalog, in `ShapeKind::ALL` order.
pub fn shapes() -> &'static [Shape; 7] {
    &SHAPES
}

/// Active falling piece
///
/// `(x, y)` is the board position of the matrix's top-left corner. `y` may be negative
/// while the piece pokes out above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Fresh piece horizontally centred on row 0.
    pub fn spawn(kind: ShapeKind) -> Self {
        let matrix = shape(kind).matrix;
        Self {
            kind,
            matrix,
            x: spawn_column(matrix.cols()),
            y: 0,
        }
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .occupied()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn with_matrix(&self, matrix: Matrix) -> Self {
        Self { matrix, ..*self }
    }

    pub fn kicks(&self) -> &'static [i8] {
        shape(self.kind).kicks
    }
}

/// `floor(WIDTH / 2) - floor(shape_width / 2)`
pub fn spawn_column(shape_width: usize) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape_width / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matrices() {
        assert_eq!(shape(ShapeKind::I).matrix.to_rows(), vec![vec![1, 1, 1, 1]]);
        assert_eq!(
            shape(ShapeKind::L).matrix.to_rows(),
            vec![vec![0, 0, 1], vec![1, 1, 1]]
        );
        assert_eq!(
            shape(ShapeKind::Z).matrix.to_rows(),
            vec![vec![1, 1, 0], vec![0, 1, 1]]
        );
        for s in shapes() {
            assert_eq!(s.matrix.count(), 4, "{:?} should have four cells", s.kind);
            assert_eq!(shape(s.kind).kind, s.kind);
        }
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Matrix::from_rows(&[]).is_none());
        assert!(Matrix::from_rows(&[&[]]).is_none());
        assert!(Matrix::from_rows(&[&[1, 0], &[1]]).is_none());
        assert!(Matrix::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
        assert!(Matrix::from_rows(&[&[1], &[1], &[1], &[1], &[1]]).is_none());
    }

    #[test]
    fn test_from_rows_matches_catalog() {
        let t = Matrix::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
        assert_eq!(t, shape(ShapeKind::T).matrix);
    }

    #[test]
    fn test_rotated_cw_t() {
        let rotated = shape(ShapeKind::T).matrix.rotated_cw();
        assert_eq!(rotated.rows(), 3);
        assert_eq!(rotated.cols(), 2);
        assert_eq!(rotated.to_rows(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_spawn_positions() {
        assert_eq!(Piece::spawn(ShapeKind::I).x, 3);
        assert_eq!(Piece::spawn(ShapeKind::O).x, 4);
        assert_eq!(Piece::spawn(ShapeKind::T).x, 4);
        assert_eq!(Piece::spawn(ShapeKind::T).y, 0);
    }

    #[test]
    fn test_kick_tables() {
        assert_eq!(Piece::spawn(ShapeKind::I).kicks(), &[1, -1, 2, -2]);
        for kind in [ShapeKind::J, ShapeKind::L, ShapeKind::O, ShapeKind::S, ShapeKind::T, ShapeKind::Z] {
            assert_eq!(Piece::spawn(kind).kicks(), &[1, -1]);
        }
    }

    #[test]
    fn test_piece_cells() {
        let piece = Piece::spawn(ShapeKind::T).translated(0, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 5), (4, 6), (5, 6), (6, 6)]);
    }
}
