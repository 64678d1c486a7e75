//! Session events, drained by observers after each step

use serde::Serialize;

use crate::piece::PieceCells;
use crate::types::{CellPos, PieceKind};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LossReason {
    /// The spawn cells overlap locked blocks
    SpawnBlocked,
    /// A piece locked with cells above the top row
    LockedAboveBoard,
}

/// A state transition of the game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    Spawned {
        piece_id: u32,
        kind: PieceKind,
        anchor: CellPos,
    },
    Locked {
        piece_id: u32,
        cells: PieceCells,
    },
    /// Full rows found; they blink until the clear delay elapses
    RowsMarked { rows: Vec<usize> },
    /// Marked rows removed and the stack above shifted down
    RowsCleared { rows: Vec<usize> },
    Lost { reason: LossReason },
}

impl GameEvent {
    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::Locked { .. } => "locked",
            GameEvent::RowsMarked { .. } => "rows marked",
            GameEvent::RowsCleared { .. } => "rows cleared",
            GameEvent::Lost { .. } => "lost",
        }
    }
}
