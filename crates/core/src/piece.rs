//! Piece module - the live, movable group of cells

use std::sync::Arc;

use crate::shapes::{RotationState, ShapeTable};
use crate::types::{CellPos, ColorFrame, PieceKind, PIECE_CELLS};

/// Absolute cells of a piece
pub type PieceCells = [CellPos; PIECE_CELLS];

/// Falling piece: kind, rotation index, anchor, display color
///
/// Translation and rotation are unchecked; callers run the collision
/// detector on the candidate cells first.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    states: Arc<[RotationState]>,
    rotation: usize,
    anchor: CellPos,
    color: ColorFrame,
}

impl Piece {
    /// Create a piece in its first rotation state
    ///
    /// Returns `None` when `states` is empty.
    pub fn new(
        kind: PieceKind,
        states: Arc<[RotationState]>,
        anchor: CellPos,
        color: ColorFrame,
    ) -> Option<Self> {
        if states.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            states,
            rotation: 0,
            anchor,
            color,
        })
    }

    /// Create a piece of `kind` from a shape table
    ///
    /// `None` if the table has no non-empty entry for `kind`.
    pub fn from_table(
        shapes: &ShapeTable,
        kind: PieceKind,
        anchor: CellPos,
        color: ColorFrame,
    ) -> Option<Self> {
        Self::new(kind, shapes.shared(kind)?, anchor, color)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn anchor(&self) -> CellPos {
        self.anchor
    }

    pub fn color(&self) -> ColorFrame {
        self.color
    }

    /// Rotation index one step clockwise, wrapping
    pub fn next_rotation_index(&self) -> usize {
        (self.rotation + 1) % self.states.len()
    }

    fn cells_for(&self, rotation: usize, d_col: i32, d_row: i32) -> PieceCells {
        let anchor = self.anchor.offset(d_col, d_row);
        self.states[rotation].map(|(col, row)| anchor.offset(col, row))
    }

    /// Occupied cells at the current anchor and rotation
    pub fn absolute_cells(&self) -> PieceCells {
        self.cells_for(self.rotation, 0, 0)
    }

    /// Cells the piece would occupy after translating by `(d_col, d_row)`
    pub fn translated_cells(&self, d_col: i32, d_row: i32) -> PieceCells {
        self.cells_for(self.rotation, d_col, d_row)
    }

    /// Cells after one rotation step, without changing the piece
    pub fn preview_rotated_cells(&self) -> PieceCells {
        self.preview_rotated_cells_kicked(0)
    }

    /// Cells after one rotation step with the anchor shifted by `d_col`
    pub fn preview_rotated_cells_kicked(&self, d_col: i32) -> PieceCells {
        self.cells_for(self.next_rotation_index(), d_col, 0)
    }

    pub fn translate(&mut self, d_col: i32, d_row: i32) {
        self.anchor = self.anchor.offset(d_col, d_row);
    }

    pub fn commit_rotation(&mut self) {
        self.rotation = self.next_rotation_index();
    }
}
