//! Shape table - rotation states for every piece kind
//!
//! Each rotation state is exactly four `(col, row)` offsets relative to the
//! piece anchor. Rows grow upward, so a negative row offset sits below the
//! anchor. States are listed in clockwise order; rotating advances to the
//! next state and wraps around.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ConfigError;
use crate::types::{PieceKind, PIECE_CELLS};

/// Offset of a single cell relative to the piece anchor: `(col, row)`
pub type Offset = (i32, i32);

/// One orientation of a piece
pub type RotationState = [Offset; PIECE_CELLS];

/// Horizontal bar, identical to the classic "line" formation
const I_STATES: [RotationState; 4] = [
    [(0, -1), (1, -1), (2, -1), (3, -1)],
    [(2, 0), (2, -1), (2, -2), (2, -3)],
    [(0, -2), (1, -2), (2, -2), (3, -2)],
    [(1, 0), (1, -1), (1, -2), (1, -3)],
];

const O_STATES: [RotationState; 4] = [[(1, 0), (2, 0), (1, -1), (2, -1)]; 4];

const T_STATES: [RotationState; 4] = [
    [(1, 0), (0, -1), (1, -1), (2, -1)],
    [(1, 0), (1, -1), (2, -1), (1, -2)],
    [(0, -1), (1, -1), (2, -1), (1, -2)],
    [(1, 0), (0, -1), (1, -1), (1, -2)],
];

const S_STATES: [RotationState; 4] = [
    [(1, 0), (2, 0), (0, -1), (1, -1)],
    [(1, 0), (1, -1), (2, -1), (2, -2)],
    [(1, -1), (2, -1), (0, -2), (1, -2)],
    [(0, 0), (0, -1), (1, -1), (1, -2)],
];

const Z_STATES: [RotationState; 4] = [
    [(0, 0), (1, 0), (1, -1), (2, -1)],
    [(2, 0), (1, -1), (2, -1), (1, -2)],
    [(0, -1), (1, -1), (1, -2), (2, -2)],
    [(1, 0), (0, -1), (1, -1), (0, -2)],
];

const J_STATES: [RotationState; 4] = [
    [(0, 0), (0, -1), (1, -1), (2, -1)],
    [(1, 0), (2, 0), (1, -1), (1, -2)],
    [(0, -1), (1, -1), (2, -1), (2, -2)],
    [(1, 0), (1, -1), (0, -2), (1, -2)],
];

const L_STATES: [RotationState; 4] = [
    [(2, 0), (0, -1), (1, -1), (2, -1)],
    [(1, 0), (1, -1), (1, -2), (2, -2)],
    [(0, -1), (1, -1), (2, -1), (0, -2)],
    [(0, 0), (1, 0), (1, -1), (1, -2)],
];

/// Mapping from piece kind to its ordered rotation states
///
/// Entries are reference counted so a live piece can hold its own states
/// without borrowing the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTable {
    entries: HashMap<PieceKind, Arc<[RotationState]>>,
}

impl ShapeTable {
    /// Table with no entries
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The seven standard tetrominoes
    pub fn standard() -> Self {
        Self::empty()
            .with_shape(PieceKind::I, I_STATES.to_vec())
            .with_shape(PieceKind::O, O_STATES.to_vec())
            .with_shape(PieceKind::T, T_STATES.to_vec())
            .with_shape(PieceKind::S, S_STATES.to_vec())
            .with_shape(PieceKind::Z, Z_STATES.to_vec())
            .with_shape(PieceKind::J, J_STATES.to_vec())
            .with_shape(PieceKind::L, L_STATES.to_vec())
    }

    /// Builder form of [`ShapeTable::insert`]
    pub fn with_shape(mut self, kind: PieceKind, states: Vec<RotationState>) -> Self {
        self.insert(kind, states);
        self
    }

    /// Replace the rotation states for `kind`
    pub fn insert(&mut self, kind: PieceKind, states: Vec<RotationState>) {
        self.entries.insert(kind, states.into());
    }

    /// Rotation states for `kind`
    pub fn states(&self, kind: PieceKind) -> Option<&[RotationState]> {
        self.entries.get(&kind).map(|s| &s[..])
    }

    /// Shared handle to the rotation states for `kind`
    pub fn shared(&self, kind: PieceKind) -> Option<Arc<[RotationState]>> {
        self.entries.get(&kind).cloned()
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Check every entry: at least one state, no repeated offsets in a state
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (&kind, states) in &self.entries {
            if states.is_empty() {
                return Err(ConfigError::EmptyShape(kind));
            }
            for (index, state) in states.iter().enumerate() {
                for (i, offset) in state.iter().enumerate() {
                    if state[i + 1..].contains(offset) {
                        return Err(ConfigError::OverlappingOffsets { kind, state: index });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_all_kinds_with_four_states() {
        let table = ShapeTable::standard();
        for kind in PieceKind::ALL {
            let states = table.states(kind).unwrap();
            assert_eq!(states.len(), 4, "{kind:?}");
        }
        assert!(table.validate().is_ok());
    }

    #[test]
    fn line_formation_matches_classic_offsets() {
        let table = ShapeTable::standard();
        let states = table.states(PieceKind::I).unwrap();
        assert_eq!(states[0], [(0, -1), (1, -1), (2, -1), (3, -1)]);
        assert_eq!(states[1], [(2, 0), (2, -1), (2, -2), (2, -3)]);
    }

    #[test]
    fn validate_rejects_empty_entry() {
        let table = ShapeTable::empty().with_shape(PieceKind::T, Vec::new());
        assert_eq!(table.validate(), Err(ConfigError::EmptyShape(PieceKind::T)));
    }

    #[test]
    fn validate_rejects_repeated_offset() {
        let table =
            ShapeTable::empty().with_shape(PieceKind::O, vec![[(0, 0), (1, 0), (0, 0), (1, 1)]]);
        assert_eq!(
            table.validate(),
            Err(ConfigError::OverlappingOffsets {
                kind: PieceKind::O,
                state: 0
            })
        );
    }
}
