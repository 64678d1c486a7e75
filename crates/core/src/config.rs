//! Session configuration
//!
//! Everything a game session needs is passed in through [`GameConfig`].
//! Configuration is validated once at construction so a bad table or a
//! zero-sized board never surfaces mid-game.

use thiserror::Error;

use crate::shapes::ShapeTable;
use crate::types::{
    CellPos, ColorFrame, PieceKind, BASE_FALL_MS, BOARD_HEIGHT, BOARD_WIDTH, CLEAR_DELAY_MS,
    DEFAULT_COLOR_FRAME, SOFT_DROP_FALL_MS,
};

/// Construction-time configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },
    #[error("shape table has no entry for piece {0:?}")]
    MissingShape(PieceKind),
    #[error("piece {0:?} has no rotation states")]
    EmptyShape(PieceKind),
    #[error("piece {kind:?} rotation state {state} repeats an offset")]
    OverlappingOffsets { kind: PieceKind, state: usize },
    #[error("piece {0:?} does not fit horizontally at the spawn anchor")]
    SpawnOutOfBounds(PieceKind),
    #[error("piece {0:?} reaches below row 0 at the spawn anchor")]
    SpawnBelowFloor(PieceKind),
    #[error("board is {actual_width}x{actual_height}, config expects {width}x{height}")]
    BoardMismatch {
        width: u16,
        height: u16,
        actual_width: u16,
        actual_height: u16,
    },
}

/// Game session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Gravity interval in milliseconds
    pub base_fall_ms: u32,
    /// Gravity interval while soft drop is held
    pub soft_drop_fall_ms: u32,
    /// How long full rows blink before they collapse
    pub clear_delay_ms: u32,
    /// The one piece kind every spawn uses
    pub spawn_kind: PieceKind,
    pub spawn_color: ColorFrame,
    pub shapes: ShapeTable,
}

impl GameConfig {
    /// Canonical spawn anchor: horizontally centered, resting on the top edge
    ///
    /// Rotation offsets reach downward from the anchor, so a spawned piece
    /// starts in the top row and partially above it.
    pub fn spawn_anchor(&self) -> CellPos {
        CellPos::new(self.height as i32, self.width as i32 / 2 - 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.base_fall_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "base_fall_ms",
            });
        }
        if self.soft_drop_fall_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "soft_drop_fall_ms",
            });
        }

        self.shapes.validate()?;

        let states = self
            .shapes
            .states(self.spawn_kind)
            .ok_or(ConfigError::MissingShape(self.spawn_kind))?;
        let anchor = self.spawn_anchor();
        let fits = states[0].iter().all(|&(d_col, _)| {
            let col = anchor.col + d_col;
            col >= 0 && col < self.width as i32
        });
        if !fits {
            return Err(ConfigError::SpawnOutOfBounds(self.spawn_kind));
        }
        if states[0].iter().any(|&(_, d_row)| anchor.row + d_row < 0) {
            return Err(ConfigError::SpawnBelowFloor(self.spawn_kind));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            base_fall_ms: BASE_FALL_MS,
            soft_drop_fall_ms: SOFT_DROP_FALL_MS,
            clear_delay_ms: CLEAR_DELAY_MS,
            spawn_kind: PieceKind::I,
            spawn_color: ColorFrame(DEFAULT_COLOR_FRAME),
            shapes: ShapeTable::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_anchor(), CellPos::new(22, 4));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 22
            })
        );
    }

    #[test]
    fn rejects_zero_fall_interval() {
        let config = GameConfig {
            soft_drop_fall_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroInterval { .. })
        ));
    }

    #[test]
    fn rejects_missing_spawn_shape() {
        let config = GameConfig {
            shapes: ShapeTable::empty(),
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingShape(PieceKind::I))
        );
    }

    #[test]
    fn rejects_board_narrower_than_spawn_piece() {
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnOutOfBounds(PieceKind::I))
        );
    }

    #[test]
    fn rejects_spawn_piece_reaching_below_floor() {
        let config = GameConfig {
            height: 2,
            shapes: ShapeTable::empty()
                .with_shape(PieceKind::I, vec![[(0, 0), (0, -1), (0, -2), (0, -3)]]),
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnBelowFloor(PieceKind::I))
        );

        // Three rows are exactly enough for the same state.
        let config = GameConfig { height: 3, ..config };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_clear_delay_is_allowed() {
        let config = GameConfig {
            clear_delay_ms: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
