//! Query-only render state
//!
//! Everything a renderer (or any other observer) may read, captured in one
//! value so the outer layers never touch live engine internals. Piece
//! coordinates are absolute board coordinates; subtract `hidden_rows` to map
//! into the visible window.

use crate::core::pieces::PieceCells;
use crate::types::{Cell, Phase, PieceKind, Rotation};

/// Active piece as seen by observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Rotation-resolved occupied cells, anchor-relative
    pub cells: PieceCells,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub cols: i8,
    pub visible_rows: i8,
    pub hidden_rows: i8,
    /// Visible cell window (bottom `visible_rows` rows), row-major
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on if hard-dropped now
    pub ghost_row: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    /// Cell of the visible window at (x, visible row y)
    pub fn visible_cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || x >= self.cols || y < 0 || y >= self.visible_rows {
            return None;
        }
        self.board[y as usize * self.cols as usize + x as usize]
    }
}
