//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond parsing and formatting,
//! so they can be used by the engine, the renderer, and the input layer alike.
//!
//! # Coordinates
//!
//! Board coordinates are `(row, col)` with row 0 at the **bottom** of the
//! playfield and rows increasing upward. Columns run left to right from 0.
//! Rows at or above the board height are "above the board": pieces spawn
//! there and are never blocked by them.
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_MS` | 300 | Gravity tick interval |
//! | `SOFT_DROP_FALL_MS` | 50 | Tick interval while soft drop is held |
//! | `CLEAR_DELAY_MS` | 1000 | Blink time before full rows collapse |
//! | `TICK_MS` | 16 | Host frame step used by the terminal runner |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{CellPos, Intent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("I"), Some(PieceKind::I));
//! assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
//!
//! let pos = CellPos::new(0, 9);
//! assert_eq!(pos.offset(1, -1), CellPos::new(1, 8));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Board height in cells (22 rows)
pub const BOARD_HEIGHT: u16 = 22;

/// Host frame step used by the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: one row every 300ms
pub const BASE_FALL_MS: u32 = 300;

/// Gravity interval while soft drop is held
pub const SOFT_DROP_FALL_MS: u32 = 50;

/// Time full rows blink before they are removed
pub const CLEAR_DELAY_MS: u32 = 1000;

/// Soft drop hold timeout for terminals without key-release events
pub const SOFT_DROP_RELEASE_TIMEOUT_MS: u32 = 150;

/// Display frame used for spawned pieces unless configured otherwise
pub const DEFAULT_COLOR_FRAME: u8 = 2;

/// Number of cells in every piece
pub const PIECE_CELLS: usize = 4;

/// The seven tetromino piece kinds
///
/// Only the kind configured as the spawn kind is ever spawned; the others
/// exist so a shape table can describe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// `line` is accepted as an alias of `I`.
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("line"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" | "line" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Player intents consumed by the engine
///
/// Soft drop is a held intent, so it has a press and a release edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDropPress,
    SoftDropRelease,
}

impl Intent {
    /// Parse intent from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Intent::MoveLeft),
            "moveright" | "right" => Some(Intent::MoveRight),
            "rotate" => Some(Intent::Rotate),
            "softdroppress" | "softdrop" => Some(Intent::SoftDropPress),
            "softdroprelease" => Some(Intent::SoftDropRelease),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::Rotate => "rotate",
            Intent::SoftDropPress => "softDropPress",
            Intent::SoftDropRelease => "softDropRelease",
        }
    }
}

/// Absolute board position (row 0 = bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: i32,
    pub col: i32,
}

impl CellPos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by a column/row delta
    pub const fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Display attribute of a block (sprite frame index)
///
/// Carried through locking so the renderer can color blocks, otherwise
/// irrelevant to game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorFrame(pub u8);
