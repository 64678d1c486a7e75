//! Board module - the locked-block grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! color frame of a locked block. Storage is a flat row-major vector.
//! Coordinates: `(row, col)` with row 0 at the bottom, rows growing upward.
//!
//! Only in-range cells can be occupied. Rows at or above `height` are
//! reported as empty; bounds are the collision detector's concern.

use crate::types::{CellPos, ColorFrame};

/// A locked cell: position plus display attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub row: i32,
    pub col: i32,
    pub color: ColorFrame,
}

impl Block {
    pub fn new(pos: CellPos, color: ColorFrame) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            color,
        }
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }
}

/// Fixed-size occupancy grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Row-major cells, `row * width + col`, row 0 first
    cells: Vec<Option<ColorFrame>>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.height as i32 && col >= 0 && col < self.width as i32
    }

    /// Color of the block at `(row, col)`, `None` when empty or out of range
    pub fn get(&self, row: i32, col: i32) -> Option<ColorFrame> {
        self.index(row, col).and_then(|idx| self.cells[idx])
    }

    /// Set or clear a single cell. Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Option<ColorFrame>) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a block sits at `(row, col)`
    ///
    /// Out-of-range positions are never occupied.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some()
    }

    /// Merge blocks into the grid
    ///
    /// Callers guarantee the target cells are free (the collision check
    /// before the last accepted move does). Returns false if any block was
    /// out of range; those blocks are dropped.
    pub fn place(&mut self, blocks: &[Block]) -> bool {
        let mut all_in_bounds = true;
        for block in blocks {
            debug_assert!(
                !self.is_occupied(block.row, block.col),
                "placing over an occupied cell at ({}, {})",
                block.row,
                block.col
            );
            all_in_bounds &= self.set(block.row, block.col, Some(block.color));
        }
        all_in_bounds
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row_cells(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    /// Indices of every full row, ascending
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Delete `rows` and let everything above fall into the gap
    ///
    /// The grid is rebuilt: surviving rows are copied bottom-up into a fresh
    /// buffer, each landing lower by the number of removed rows beneath it,
    /// and the top is padded with empty rows. Indices outside the board and
    /// duplicates are ignored. Returns the number of rows removed.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut doomed = vec![false; height];
        for &row in rows {
            if row < height {
                doomed[row] = true;
            }
        }
        let removed = doomed.iter().filter(|&&d| d).count();
        if removed == 0 {
            return 0;
        }

        let mut rebuilt = Vec::with_capacity(self.cells.len());
        for (row, &is_doomed) in doomed.iter().enumerate() {
            if !is_doomed {
                let start = row * width;
                rebuilt.extend_from_slice(&self.cells[start..start + width]);
            }
        }
        rebuilt.resize(self.cells.len(), None);
        self.cells = rebuilt;

        removed
    }

    /// Cells of one row, left to right
    pub fn row_cells(&self, row: usize) -> Option<&[Option<ColorFrame>]> {
        if row >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = row * width;
        Some(&self.cells[start..start + width])
    }

    /// Every locked block, bottom row first
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|color| Block {
                row: (idx / width) as i32,
                col: (idx % width) as i32,
                color,
            })
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
