//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and hosts the pieces of
//! the binary that are worth testing: argument parsing and the headless
//! runner.

pub mod cli;
pub mod headless;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
