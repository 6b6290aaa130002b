//! Engine configuration
//!
//! All constants the engine depends on live here as one immutable value the
//! engine owns, instead of module-level globals: board shape, visible window,
//! gravity base, and the wall-kick tables for the three kick classes. Tests
//! and board-size variants construct their own.

use crate::core::pieces::{KickTable, I_KICKS, JLSTZ_KICKS, O_KICKS};
use crate::types::{
    PieceKind, BASE_DROP_MS, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_VISIBLE_ROWS,
};

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// Board column count
    pub cols: i8,
    /// Total row count, including the hidden buffer above the visible window
    pub rows: i8,
    /// Rows shown to the renderer (the bottom of the board)
    pub visible_rows: i8,
    /// Gravity interval at level 1, in milliseconds
    pub base_drop_ms: u32,
    /// Kick offsets for the I piece
    pub kicks_i: &'static KickTable,
    /// Kick offsets for the O piece (identity)
    pub kicks_o: &'static KickTable,
    /// Kick offsets shared by J, L, S, T, Z
    pub kicks_jlstz: &'static KickTable,
}

impl GameConfig {
    /// The kick table for a piece's kick class
    pub fn kick_table(&self, kind: PieceKind) -> &'static KickTable {
        match kind {
            PieceKind::I => self.kicks_i,
            PieceKind::O => self.kicks_o,
            _ => self.kicks_jlstz,
        }
    }

    /// Row count of the hidden buffer above the visible window
    pub fn hidden_rows(&self) -> i8 {
        self.rows - self.visible_rows
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            visible_rows: DEFAULT_VISIBLE_ROWS,
            base_drop_ms: BASE_DROP_MS,
            kicks_i: &I_KICKS,
            kicks_o: &O_KICKS,
            kicks_jlstz: &JLSTZ_KICKS,
        }
    }
}
