//! Pieces module - tetromino geometry and SRS wall kicks
//!
//! Each piece kind has one canonical occupancy matrix; every orientation is
//! derived from it by applying a 90-degree clockwise rotation `rotation.index()`
//! times. There is no accumulated rotation state anywhere, so repeated
//! rotation cannot drift.
//!
//! Kick offsets are in board coordinates (+x right, +y down).
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece anchor (col, row)
pub type MinoOffset = (i8, i8);

/// The four mino offsets of a piece in some orientation
pub type PieceCells = ArrayVec<MinoOffset, 4>;

/// Static definition of one piece kind: canonical matrix plus display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    /// Side length of the occupancy matrix (I: 4, O: 2, rest: 3)
    pub size: i8,
    /// Canonical matrix, top-left `size x size` window used
    pub grid: [[u8; 4]; 4],
    /// Display color (r, g, b)
    pub color: (u8, u8, u8),
}

const I_DEF: PieceDefinition = PieceDefinition {
    size: 4,
    grid: [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0x00, 0xf0, 0xf0),
};

const O_DEF: PieceDefinition = PieceDefinition {
    size: 2,
    grid: [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0xf0, 0xf0, 0x00),
};

const T_DEF: PieceDefinition = PieceDefinition {
    size: 3,
    grid: [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0xa0, 0x00, 0xf0),
};

const S_DEF: PieceDefinition = PieceDefinition {
    size: 3,
    grid: [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0x00, 0xf0, 0x00),
};

const Z_DEF: PieceDefinition = PieceDefinition {
    size: 3,
    grid: [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0xf0, 0x00, 0x00),
};

const J_DEF: PieceDefinition = PieceDefinition {
    size: 3,
    grid: [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0x00, 0x00, 0xf0),
};

const L_DEF: PieceDefinition = PieceDefinition {
    size: 3,
    grid: [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    color: (0xf0, 0xa0, 0x00),
};

/// Get the static definition for a piece kind
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    match kind {
        PieceKind::I => &I_DEF,
        PieceKind::O => &O_DEF,
        PieceKind::T => &T_DEF,
        PieceKind::S => &S_DEF,
        PieceKind::Z => &Z_DEF,
        PieceKind::J => &J_DEF,
        PieceKind::L => &L_DEF,
    }
}

/// Display color for a piece kind
pub fn color(kind: PieceKind) -> (u8, u8, u8) {
    definition(kind).color
}

/// Occupied cells of a piece in the given orientation, as (col, row) offsets
/// from the anchor (top-left of the occupancy matrix).
///
/// Pure function of (kind, rotation): the canonical matrix is rotated
/// clockwise `rotation.index()` times. A cell (r, c) of the k-times rotated
/// matrix reads from (size-1-c, r) of the (k-1)-times rotated one.
pub fn occupied_cells(kind: PieceKind, rotation: Rotation) -> PieceCells {
    let def = definition(kind);
    let n = def.size;
    let turns = rotation.index();

    let mut cells = PieceCells::new();
    for row in 0..n {
        for col in 0..n {
            let (mut r, mut c) = (row, col);
            for _ in 0..turns {
                let (pr, pc) = (n - 1 - c, r);
                r = pr;
                c = pc;
            }
            if def.grid[r as usize][c as usize] != 0 {
                cells.push((col, row));
            }
        }
    }
    cells
}

/// SRS wall kick data
/// Each entry is a (dx, dy) offset to try, in order; the first offset whose
/// translated shape does not collide wins.
pub type KickTable = [[(i8, i8); 5]; 8];

/// O piece rotates in place (rotationally symmetric)
pub static O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// Kick table shared by J, L, S, T, Z
pub static JLSTZ_KICKS: KickTable = [
    // 0>>1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0>>3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1>>0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1>>2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2>>1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2>>3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3>>2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3>>0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table (its bounding box does not center like the others)
pub static I_KICKS: KickTable = [
    // 0>>1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0>>3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1>>0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1>>2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2>>1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2>>3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3>>2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3>>0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Row of the kick table for a rotation transition
fn kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // 0>>1
        (Rotation::North, false) => 1, // 0>>3
        (Rotation::East, false) => 2,  // 1>>0
        (Rotation::East, true) => 3,   // 1>>2
        (Rotation::South, false) => 4, // 2>>1
        (Rotation::South, true) => 5,  // 2>>3
        (Rotation::West, false) => 6,  // 3>>2
        (Rotation::West, true) => 7,   // 3>>0
    }
}

/// Try to rotate a piece, resolving wall kicks.
///
/// `collides` reports whether a single cell at absolute (x, y) is blocked.
/// Returns `Some((new_rotation, (dx, dy)))` for the first offset in table
/// order whose translated, rotated shape is fully clear; `None` if every
/// candidate collides (the caller leaves the piece untouched).
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    kicks: &KickTable,
    collides: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    let cells = occupied_cells(kind, new_rotation);
    let candidates = &kicks[kick_index(rotation, clockwise)];

    for &(dx, dy) in candidates.iter() {
        let clear = cells
            .iter()
            .all(|&(cx, cy)| !collides(x + dx + cx, y + dy + cy));
        if clear {
            return Some((new_rotation, (dx, dy)));
        }
    }

    None
}
