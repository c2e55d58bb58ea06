//! Board tests - grid access, merging and line clearing

use blockfall::core::board::{clear_lines, create_empty_board, merge_piece_to_board};
use blockfall::core::{Board, Piece};
use blockfall::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = create_empty_board();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "Cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(board.is_out_of_bounds(0, BOARD_HEIGHT as i8));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(ShapeKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(ShapeKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Some(ShapeKind::T)));
    assert!(!board.set(BOARD_WIDTH as i8, 0, Some(ShapeKind::T)));
}

#[test]
fn test_merge_leaves_input_untouched() {
    let board = Board::new();
    let piece = Piece {
        y: 18,
        ..Piece::spawn(ShapeKind::O)
    };

    let merged = merge_piece_to_board(&piece, &board);

    assert_eq!(board.filled_count(), 0);
    assert_eq!(merged.filled_count(), 4);
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(merged.get(x, y), Some(Some(ShapeKind::O)));
    }
}

#[test]
fn test_merge_drops_cells_above_the_board() {
    let board = Board::new();
    let piece = Piece {
        y: -1,
        ..Piece::spawn(ShapeKind::T)
    };
    let merged = merge_piece_to_board(&piece, &board);

    // Only the bottom row of the T is on the board.
    assert_eq!(merged.filled_count(), 3);
    assert!(merged.row(0).unwrap()[4..7].iter().all(|c| c.is_some()));
}

#[test]
fn test_clear_lines_without_full_rows_is_identity() {
    let board = Board::from_rows(&["T.........", "IIIIIIIII.", "OO..ZZ...."]);
    let result = clear_lines(&board);
    assert_eq!(result.lines_cleared, 0);
    assert_eq!(result.board, board);
    assert_eq!(result.board.rows().count(), BOARD_HEIGHT as usize);
}

#[test]
fn test_clear_lines_shifts_rows_down() {
    let board = Board::from_rows(&["J.........", "IIIIIIIIII", "..L.......", "OOOOOOOOOO"]);
    let result = clear_lines(&board);

    assert_eq!(result.lines_cleared, 2);
    assert_eq!(result.board.get(2, 19), Some(Some(ShapeKind::L)));
    assert_eq!(result.board.get(0, 18), Some(Some(ShapeKind::J)));
    assert_eq!(result.board.filled_count(), 2);
    assert_eq!(result.board.rows().count(), BOARD_HEIGHT as usize);
}

#[test]
fn test_board_clear_multiple_rows_order() {
    let mut board = Board::new();

    for y in [5, 10, 15] {
        board.fill_row_except(y, &[], ShapeKind::I);
    }
    board.set(0, 4, Some(ShapeKind::J));
    board.set(0, 9, Some(ShapeKind::L));
    board.set(0, 14, Some(ShapeKind::S));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[15, 10, 5]);

    // Each marker drops by the number of full rows below it.
    assert_eq!(board.get(0, 7), Some(Some(ShapeKind::J)));
    assert_eq!(board.get(0, 11), Some(Some(ShapeKind::L)));
    assert_eq!(board.get(0, 15), Some(Some(ShapeKind::S)));
}

#[test]
fn test_four_rows_at_once() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row_except(y, &[], ShapeKind::Z);
    }
    assert_eq!(clear_lines(&board).lines_cleared, 4);
}

#[test]
fn test_write_grid_matches_cells() {
    let board = Board::from_rows(&["S........T"]);
    let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_grid(&mut grid);

    assert_eq!(grid[19][0], Some(ShapeKind::S));
    assert_eq!(grid[19][9], Some(ShapeKind::T));
    assert_eq!(grid.iter().flatten().filter(|c| c.is_some()).count(), 2);
}
