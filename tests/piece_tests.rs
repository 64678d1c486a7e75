//! Piece, collision, and wall kick tests

use blockfall::core::{collides, try_rotate, Board, Piece, ShapeTable};
use blockfall::types::{CellPos, ColorFrame, PieceKind};

fn piece(kind: PieceKind, row: i32, col: i32) -> Piece {
    Piece::from_table(&ShapeTable::standard(), kind, CellPos::new(row, col), ColorFrame(2))
        .unwrap()
}

#[test]
fn test_every_rotation_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        let mut p = piece(kind, 10, 4);
        for _ in 0..p.state_count() {
            let cells = p.absolute_cells();
            assert_eq!(cells.len(), 4);
            for (i, c) in cells.iter().enumerate() {
                assert!(!cells[i + 1..].contains(c), "{kind:?} repeats {c:?}");
            }
            p.commit_rotation();
            assert!(p.rotation_index() < p.state_count());
        }
        assert_eq!(p.rotation_index(), 0);
    }
}

#[test]
fn test_collision_rejects_walls_and_floor() {
    let board = Board::new(10, 22);
    for row in [0, 10, 21, 30] {
        assert!(collides(&board, &[CellPos::new(row, -1)]));
        assert!(collides(&board, &[CellPos::new(row, 10)]));
    }
    for col in 0..10 {
        assert!(collides(&board, &[CellPos::new(-1, col)]));
    }
}

#[test]
fn test_collision_accepts_cells_above_board() {
    let mut board = Board::new(10, 22);
    for col in 0..10 {
        board.set(21, col, Some(ColorFrame(1)));
    }
    for col in 0..10 {
        assert!(!collides(&board, &[CellPos::new(22, col), CellPos::new(25, col)]));
    }
}

#[test]
fn test_collision_checks_every_candidate() {
    let mut board = Board::new(10, 22);
    board.set(4, 4, Some(ColorFrame(1)));
    let cells = [
        CellPos::new(7, 4),
        CellPos::new(6, 4),
        CellPos::new(5, 4),
        CellPos::new(4, 4),
    ];
    assert!(collides(&board, &cells));
}

#[test]
fn test_wall_kick_shifts_right_from_left_wall() {
    let board = Board::new(10, 22);
    // Vertical line in column 0 (west state, anchor one column left of it).
    let mut p = piece(PieceKind::I, 8, 0);
    for _ in 0..3 {
        p.commit_rotation();
    }
    p.translate(-1, 0);
    let before = p.absolute_cells();
    assert!(before.iter().all(|c| c.col == 0));

    assert_eq!(try_rotate(&mut p, &board), Some(1));
    assert_eq!(p.rotation_index(), 0);
    assert_eq!(p.anchor(), CellPos::new(8, 0));
    assert_eq!(
        p.absolute_cells(),
        [
            CellPos::new(7, 0),
            CellPos::new(7, 1),
            CellPos::new(7, 2),
            CellPos::new(7, 3)
        ]
    );
}

#[test]
fn test_wall_kick_shifts_left_from_right_wall() {
    let board = Board::new(10, 22);
    // East state sits in column anchor+2; anchor 7 puts it on the right wall.
    let mut p = piece(PieceKind::I, 8, 7);
    p.commit_rotation();
    assert!(p.absolute_cells().iter().all(|c| c.col == 9));

    assert_eq!(try_rotate(&mut p, &board), Some(-1));
    assert_eq!(p.anchor(), CellPos::new(8, 6));
    assert_eq!(p.rotation_index(), 2);
}

#[test]
fn test_rotation_rejected_when_both_kicks_collide() {
    let mut board = Board::new(10, 22);
    let mut p = piece(PieceKind::I, 8, 0);
    for _ in 0..3 {
        p.commit_rotation();
    }
    p.translate(-1, 0);
    // Block the +1 kick target as well.
    board.set(7, 2, Some(ColorFrame(1)));

    let before = p.clone();
    assert_eq!(try_rotate(&mut p, &board), None);
    assert_eq!(p.rotation_index(), before.rotation_index());
    assert_eq!(p.anchor(), before.anchor());
}

#[test]
fn test_o_piece_rotation_is_stable() {
    let board = Board::new(10, 22);
    let mut p = piece(PieceKind::O, 5, 3);
    let before = p.absolute_cells();
    assert_eq!(try_rotate(&mut p, &board), Some(0));
    assert_eq!(p.absolute_cells(), before);
}
