//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block engine. It has no
//! dependencies on terminals, input devices, or wall-clock time:
//!
//! - **Deterministic**: time only moves when the host calls
//!   [`GameState::step`] with an elapsed duration
//! - **Single owner**: the session owns its board, piece, and timers
//! - **Quiet failures**: blocked moves and rotations are rejected, not errors
//!
//! # Module Structure
//!
//! - [`shapes`]: rotation states for each piece kind
//! - [`board`]: locked-block grid, full-row scan, row removal
//! - [`piece`]: the live piece and its absolute cells
//! - [`collision`]: wall, floor, and overlap checks
//! - [`rotation`]: rotation with a one-column wall kick
//! - [`scheduler`]: cancellable repeating and one-shot tasks on a virtual clock
//! - [`game_state`]: gravity, soft drop, locking, line clears, spawning
//! - [`config`]: session configuration and its validation
//! - [`snapshot`]: owned state copy for renderers
//! - [`events`]: transitions reported to observers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState, Phase};
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! game.start();
//!
//! game.move_left();
//! game.rotate();
//! game.set_soft_drop(true);
//! game.step(16);
//!
//! assert_eq!(game.phase(), Phase::Falling);
//! assert!(!game.lost());
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod events;
pub mod game_state;
pub mod piece;
pub mod rotation;
pub mod scheduler;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Block, Board};
pub use collision::collides;
pub use config::{ConfigError, GameConfig};
pub use events::{GameEvent, LossReason};
pub use game_state::{GameState, Phase, EVENT_LOG_CAP};
pub use piece::{Piece, PieceCells};
pub use rotation::{try_rotate, KICK_COLUMNS};
pub use scheduler::{Scheduler, TaskHandle};
pub use shapes::{Offset, RotationState, ShapeTable};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
