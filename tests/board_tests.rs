//! Board tests - occupancy, full-row scan, row removal

use blockfall::core::{Block, Board};
use blockfall::types::{CellPos, ColorFrame};

const GRAY: ColorFrame = ColorFrame(1);

fn fill_row_except(board: &mut Board, row: i32, gap: Option<i32>) {
    for col in 0..board.width() as i32 {
        if Some(col) != gap {
            board.set(row, col, Some(GRAY));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(10, 22);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 22);
    assert_eq!(board.occupied_count(), 0);
    for row in 0..22 {
        for col in 0..10 {
            assert!(!board.is_occupied(row, col), "({row}, {col}) should be empty");
        }
    }
}

#[test]
fn test_out_of_range_rows_are_not_occupied() {
    let mut board = Board::new(10, 22);
    fill_row_except(&mut board, 21, None);
    assert!(!board.is_occupied(22, 0));
    assert!(!board.is_occupied(100, 3));
    assert!(!board.is_occupied(-1, 3));
    assert!(!board.set(22, 0, Some(GRAY)));
}

#[test]
fn test_full_row_is_reported() {
    let mut board = Board::new(10, 22);
    fill_row_except(&mut board, 0, None);
    fill_row_except(&mut board, 5, None);
    assert_eq!(board.full_rows(), vec![0, 5]);
}

#[test]
fn test_row_missing_one_column_is_not_full() {
    let mut board = Board::new(10, 22);
    for gap in 0..10 {
        board.clear();
        fill_row_except(&mut board, 3, Some(gap));
        assert!(board.full_rows().is_empty(), "gap at column {gap}");
    }
}

#[test]
fn test_remove_empty_set_leaves_board_unchanged() {
    let mut board = Board::new(10, 22);
    fill_row_except(&mut board, 0, Some(4));
    board.set(7, 2, Some(ColorFrame(3)));
    let before = board.clone();

    assert_eq!(board.remove_rows(&[]), 0);
    assert_eq!(board, before);

    // A board with nothing full stays put through a full scan-and-remove cycle.
    let rows = board.full_rows();
    board.remove_rows(&rows);
    assert_eq!(board, before);
}

#[test]
fn test_remove_rows_shifts_stack_down_preserving_columns() {
    let mut board = Board::new(4, 6);
    fill_row_except(&mut board, 1, None);
    fill_row_except(&mut board, 3, None);
    board.set(0, 1, Some(ColorFrame(5)));
    board.set(2, 0, Some(ColorFrame(6)));
    board.set(4, 3, Some(ColorFrame(7)));
    board.set(5, 2, Some(ColorFrame(8)));

    assert_eq!(board.remove_rows(&[1, 3]), 2);

    // Below both removed rows: unchanged.
    assert_eq!(board.get(0, 1), Some(ColorFrame(5)));
    // Between them: down by one.
    assert_eq!(board.get(1, 0), Some(ColorFrame(6)));
    // Above both: down by two.
    assert_eq!(board.get(2, 3), Some(ColorFrame(7)));
    assert_eq!(board.get(3, 2), Some(ColorFrame(8)));
    // Top rows refilled empty.
    assert!(board.row_cells(4).unwrap().iter().all(Option::is_none));
    assert!(board.row_cells(5).unwrap().iter().all(Option::is_none));
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_remove_top_row() {
    let mut board = Board::new(3, 3);
    fill_row_except(&mut board, 2, None);
    board.set(1, 1, Some(ColorFrame(4)));
    board.remove_rows(&[2]);
    assert_eq!(board.get(1, 1), Some(ColorFrame(4)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_place_merges_blocks_with_color() {
    let mut board = Board::new(10, 22);
    let blocks = [
        Block::new(CellPos::new(0, 0), ColorFrame(2)),
        Block::new(CellPos::new(0, 1), ColorFrame(2)),
        Block::new(CellPos::new(1, 1), ColorFrame(9)),
    ];
    assert!(board.place(&blocks));
    assert_eq!(board.get(1, 1), Some(ColorFrame(9)));
    assert_eq!(board.blocks().count(), 3);
}
