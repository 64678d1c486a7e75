//! Collision detection against walls, floor, and locked blocks

use crate::board::Board;
use crate::types::CellPos;

/// Whether any candidate cell is illegal
///
/// A cell collides when it is left of column 0, right of the last column,
/// below row 0, or on an occupied board cell. Cells at or above the board
/// height never collide: pieces spawn there.
pub fn collides(board: &Board, cells: &[CellPos]) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;

    cells.iter().any(|&CellPos { row, col }| {
        if col < 0 || col >= width || row < 0 {
            return true;
        }
        if row >= height {
            return false;
        }
        board.is_occupied(row, col)
    })
}
