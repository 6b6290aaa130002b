//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Reference board dimensions (cells)
pub const DEFAULT_COLS: i8 = 10;
pub const DEFAULT_ROWS: i8 = 40;
pub const DEFAULT_VISIBLE_ROWS: i8 = 20;

/// Game timing constants (in milliseconds)
pub const FRAME_MS: u32 = 16;
pub const BASE_DROP_MS: u32 = 1000;
/// Gravity speeds up by this much per level gained.
pub const DROP_STEP_MS: u32 = 100;
/// Gravity never drops below this interval (reached at level 10+).
pub const DROP_FLOOR_MS: u32 = 100;

/// Points awarded per simultaneous line clear, indexed by count (0-4).
/// Multiplied by the current level.
pub const LINE_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to a one-letter display string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states (North = spawn orientation)
///
/// The index (0-3) counts 90-degree clockwise turns applied to the
/// canonical piece matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Number of clockwise quarter turns from the spawn orientation.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Game lifecycle phases
///
/// `GameOver` is terminal; only a reset leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Horizontal/vertical piece movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Game actions (the full command surface exposed to input adapters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Restart,
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
