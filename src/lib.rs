//! Terminal falling-block puzzle.
//!
//! The game core (`core`) is pure and deterministic; `input` and `term` are
//! thin crossterm adapters on either side of it, wired together by an
//! explicit driver loop in the binary.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
