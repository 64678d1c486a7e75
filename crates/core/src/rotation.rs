//! Rotation with a simplified wall kick
//!
//! The rotated state is tried in place, then one column left, then one
//! column right. No row kicks and no per-kind kick tables.

use crate::board::Board;
use crate::collision::collides;
use crate::piece::Piece;

/// Column shifts tried in order when rotating
pub const KICK_COLUMNS: [i32; 3] = [0, -1, 1];

/// Rotate `piece` one step if any kick position is free
///
/// Returns the column shift that was applied, or `None` if every candidate
/// collided, in which case the piece is untouched.
pub fn try_rotate(piece: &mut Piece, board: &Board) -> Option<i32> {
    let kick = KICK_COLUMNS
        .into_iter()
        .find(|&d_col| !collides(board, &piece.preview_rotated_cells_kicked(d_col)))?;

    piece.translate(kick, 0);
    piece.commit_rotation();
    Some(kick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTable;
    use crate::types::{CellPos, ColorFrame, PieceKind};

    fn piece(kind: PieceKind, row: i32, col: i32) -> Piece {
        Piece::from_table(&ShapeTable::standard(), kind, CellPos::new(row, col), ColorFrame(2))
            .unwrap()
    }

    #[test]
    fn rotates_in_place_when_free() {
        let board = Board::new(10, 22);
        let mut p = piece(PieceKind::I, 10, 4);
        assert_eq!(try_rotate(&mut p, &board), Some(0));
        assert_eq!(p.rotation_index(), 1);
        assert_eq!(p.anchor(), CellPos::new(10, 4));
    }

    #[test]
    fn kicks_right_off_the_left_wall() {
        let board = Board::new(10, 22);
        // Vertical line hugging column 0; the horizontal state would reach
        // column -1 in place and -2 with the left kick.
        let mut p = piece(PieceKind::I, 10, 0);
        p.commit_rotation();
        p.commit_rotation();
        p.commit_rotation();
        p.translate(-1, 0);
        assert!(!collides(&board, &p.absolute_cells()));
        assert!(collides(&board, &p.preview_rotated_cells()));

        assert_eq!(try_rotate(&mut p, &board), Some(1));
        assert_eq!(p.rotation_index(), 0);
        assert_eq!(p.anchor(), CellPos::new(10, 0));
    }

    #[test]
    fn kicks_left_before_right() {
        let mut board = Board::new(10, 22);
        let mut p = piece(PieceKind::I, 10, 4);
        // Block the in-place vertical column (col 6) only.
        board.set(8, 6, Some(ColorFrame(1)));
        assert_eq!(try_rotate(&mut p, &board), Some(-1));
        assert_eq!(p.anchor(), CellPos::new(10, 3));
        assert_eq!(p.rotation_index(), 1);
    }

    #[test]
    fn rejected_rotation_leaves_piece_unchanged() {
        let mut board = Board::new(10, 22);
        let mut p = piece(PieceKind::I, 10, 4);
        for col in 5..=7 {
            board.set(8, col, Some(ColorFrame(1)));
        }
        let before = p.clone();
        assert_eq!(try_rotate(&mut p, &board), None);
        assert_eq!(p, before);
    }
}
