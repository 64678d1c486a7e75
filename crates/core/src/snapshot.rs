//! Render-facing copy of the session state
//!
//! A snapshot owns its data, so a renderer or a JSON dump can hold it
//! without borrowing the live session.

use serde::Serialize;

use crate::game_state::Phase;
use crate::piece::{Piece, PieceCells};
use crate::types::{CellPos, ColorFrame, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub anchor: CellPos,
    pub color: ColorFrame,
    pub cells: PieceCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation_index(),
            anchor: piece.anchor(),
            color: piece.color(),
            cells: piece.absolute_cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Rows bottom first, cells left to right
    pub board: Vec<Vec<Option<ColorFrame>>>,
    pub clearing_rows: Vec<usize>,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub lost: bool,
    pub won: bool,
    pub piece_id: u32,
    pub fall_interval_ms: u32,
    pub soft_drop_held: bool,
    pub now_ms: u64,
}

impl GameSnapshot {
    /// Locked block color at `(row, col)`
    pub fn cell(&self, row: i32, col: i32) -> Option<ColorFrame> {
        if row < 0 || col < 0 {
            return None;
        }
        self.board
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
            .flatten()
    }

    pub fn is_blinking(&self, row: usize) -> bool {
        self.clearing_rows.contains(&row)
    }

    /// Whether the live piece covers `(row, col)`
    pub fn active_covers(&self, row: i32, col: i32) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.cells.contains(&CellPos::new(row, col)))
    }
}
