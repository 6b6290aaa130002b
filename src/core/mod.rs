//! Core module - pure game logic with no I/O dependencies
//!
//! Board representation, piece geometry and wall kicks, 7-bag randomization,
//! scoring, and the game engine that orchestrates them. Deterministic per
//! seed and fully exercisable headless.

pub mod board;
pub mod config;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use config::GameConfig;
pub use engine::{ActivePiece, GameEngine};
pub use rng::RandomBag;
pub use snapshot::GameSnapshot;
