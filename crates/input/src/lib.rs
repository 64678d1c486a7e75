//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Intent`]s and tracks the
//! held soft-drop key, including on terminals that never report key release.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit, should_restart, KeyBinding};
