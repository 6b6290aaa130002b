//! Board module - manages the locked-cell grid
//!
//! The grid is rows x cols (reference: 40x10, only the bottom 20 rows are
//! shown). Flat row-major storage, dimensions come from `GameConfig`.
//! Coordinates: (x, y) with x in 0..cols (left to right) and y in 0..rows
//! (top to bottom). Rows above the grid (y < 0) exist conceptually: pieces
//! may occupy them while spawning or kicking, they are only checked against
//! the side walls.

use crate::types::{Cell, PieceKind};

/// The playfield of locked cells
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cols: i8,
    rows: i8,
    /// Flat cell storage, row-major (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the given dimensions
    pub fn new(cols: i8, rows: i8) -> Self {
        assert!(cols > 0 && rows > 0);
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.cols || y < 0 || y >= self.rows {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    pub fn cols(&self) -> i8 {
        self.cols
    }

    pub fn rows(&self) -> i8 {
        self.rows
    }

    /// Get cell at (x, y); None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a single cell position is blocked for piece placement.
    ///
    /// Blocked: outside the side walls, at or below the floor, or overlapping
    /// a locked cell. Positions above the top (y < 0) are not blocked by
    /// content, only by the walls.
    pub fn cell_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= self.cols || y >= self.rows {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.cells[y as usize * self.cols as usize + x as usize].is_some()
    }

    /// Whether a shape anchored at (x, y) collides with walls, floor, or
    /// locked content. `cells` are (col, row) offsets from the anchor.
    pub fn collides_at(&self, x: i8, y: i8, cells: &[(i8, i8)]) -> bool {
        cells.iter().any(|&(dx, dy)| self.cell_blocked(x + dx, y + dy))
    }

    /// Lock a piece's cells onto the board.
    ///
    /// Cells above the top of the grid are silently dropped; they contribute
    /// nothing and are not an error.
    pub fn lock(&mut self, x: i8, y: i8, cells: &[(i8, i8)], kind: PieceKind) {
        for &(dx, dy) in cells {
            let px = x + dx;
            let py = y + dy;
            if let Some(i) = self.index(px, py) {
                self.cells[i] = Some(kind);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        match self.index(0, y) {
            Some(start) => self.cells[start..start + self.cols as usize]
                .iter()
                .all(|c| c.is_some()),
            None => false,
        }
    }

    /// Remove every full row, inserting fresh empty rows at the top, and
    /// return how many were cleared.
    ///
    /// Two-pointer compaction scanning from the bottom: non-full rows slide
    /// down into the write position, which preserves their relative order and
    /// handles multiple separated full rows in one pass.
    pub fn clear_full_rows(&mut self) -> usize {
        let cols = self.cols as usize;
        let mut cleared = 0usize;
        let mut write_y = self.rows as usize;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y as i8) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * cols;
                    let dst = write_y * cols;
                    self.cells.copy_within(src..src + cols, dst);
                }
            }
        }

        // Rows above the write position become the inserted empty rows.
        for cell in &mut self.cells[..write_y * cols] {
            *cell = None;
        }

        cleared
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// The bottom `visible_rows` rows, top to bottom, for rendering
    pub fn visible_window(&self, visible_rows: i8) -> &[Cell] {
        let visible = visible_rows.clamp(0, self.rows) as usize;
        let start = (self.rows as usize - visible) * self.cols as usize;
        &self.cells[start..]
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
