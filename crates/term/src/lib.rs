//! Terminal front end for the engine.
//!
//! Renders snapshots into a simple framebuffer and flushes it to the
//! terminal with crossterm. Nothing here feeds back into game rules.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport, BLINK_MS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
