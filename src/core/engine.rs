//! Engine module - the complete game state machine
//!
//! Ties the board, piece geometry, bag, and scoring together behind the
//! command surface (move, rotate, hold, hard drop, tick). Every command runs
//! to completion synchronously; the only failures are boolean rejections and
//! the terminal `GameOver` phase.
//!
//! The engine never schedules its own continuation: an external driver calls
//! `tick(elapsed_ms)` at whatever cadence it likes and is expected not to
//! tick while paused.

use crate::core::config::GameConfig;
use crate::core::pieces::{self, occupied_cells, PieceCells};
use crate::core::rng::RandomBag;
use crate::core::scoring::{drop_interval_ms, level_for_lines, line_points};
use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::core::Board;
use crate::types::{Direction, GameAction, Phase, PieceKind, Rotation};

/// The falling piece currently under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Anchor column of the occupancy matrix's top-left cell
    pub x: i8,
    /// Anchor row of the occupancy matrix's top-left cell
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at its canonical spawn position and orientation.
    ///
    /// I and O center on the board; the 3-wide pieces sit one column left of
    /// center. The I piece spawns one row higher than everything else. This
    /// asymmetry is deliberate and load-bearing; do not "fix" it.
    pub fn spawn(kind: PieceKind, config: &GameConfig) -> Self {
        let size = pieces::definition(kind).size;
        let mut x = config.cols / 2 - size / 2;
        if !matches!(kind, PieceKind::I | PieceKind::O) {
            x -= 1;
        }
        let y = config.hidden_rows() + if kind == PieceKind::I { 0 } else { 1 };
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Occupied cells for the current orientation, as anchor-relative offsets
    pub fn cells(&self) -> PieceCells {
        occupied_cells(self.kind, self.rotation)
    }
}

/// Complete game state and command surface
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    bag: RandomBag,
    active: Option<ActivePiece>,
    next: PieceKind,
    hold: Option<PieceKind>,
    can_hold: bool,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    phase: Phase,
}

impl GameEngine {
    /// Create a new engine; no piece is in play until `start` (or a reset)
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut bag = RandomBag::new(seed);
        let next = bag.next();
        Self {
            board: Board::new(config.cols, config.rows),
            bag,
            active: None,
            next,
            hold: None,
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: config.base_drop_ms,
            drop_timer_ms: 0,
            phase: Phase::NotStarted,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current gravity interval in milliseconds
    pub fn drop_interval(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Begin play: spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.phase = Phase::Running;
        self.spawn_next();
    }

    /// Promote the stored next kind to a fresh active piece and draw a new
    /// next from the bag.
    ///
    /// If the spawn position already collides the engine goes straight to
    /// `GameOver` (block out) and no piece is left in play.
    pub fn spawn_next(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.next, &self.config);
        self.next = self.bag.next();
        self.can_hold = true;

        if self.board.collides_at(piece.x, piece.y, &piece.cells()) {
            self.active = None;
            self.phase = Phase::GameOver;
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Translate the active piece one cell.
    ///
    /// A blocked left/right move is a plain rejection. A blocked down move
    /// locks the piece where it is (clearing lines, scoring, and spawning
    /// the next piece) and still reports failure: no downward motion happened
    /// on this call.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let (dx, dy) = match direction {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        };

        if !self
            .board
            .collides_at(active.x + dx, active.y + dy, &active.cells())
        {
            self.active = Some(ActivePiece {
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            return true;
        }

        if direction == Direction::Down {
            self.lock_active();
        }
        false
    }

    /// Rotate the active piece, resolving wall kicks in table order.
    ///
    /// On failure the rotation index and coordinates are exactly as before.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let result = pieces::try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            self.config.kick_table(active.kind),
            |x, y| board.cell_blocked(x, y),
        );

        if let Some((rotation, (dx, dy))) = result {
            self.active = Some(ActivePiece {
                rotation,
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            return true;
        }
        false
    }

    /// Stash the active piece, at most once per piece life.
    ///
    /// An empty slot stores the piece and spawns the next one; an occupied
    /// slot swaps, re-spawning the stored kind at its canonical spawn
    /// position rather than where the outgoing piece was.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold {
            None => {
                self.hold = Some(active.kind);
                self.spawn_next();
            }
            Some(stored) => {
                self.hold = Some(active.kind);
                self.active = Some(ActivePiece::spawn(stored, &self.config));
            }
        }
        self.can_hold = false;
        true
    }

    /// Drop the active piece straight down until it locks
    pub fn hard_drop(&mut self) {
        while self.move_piece(Direction::Down) {}
    }

    /// Advance game time; applies one gravity step once the accumulated time
    /// exceeds the drop interval. Returns whether gravity fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms > self.drop_interval_ms {
            self.drop_timer_ms = 0;
            self.move_piece(Direction::Down);
            return true;
        }
        false
    }

    /// Row the active piece would come to rest on if hard-dropped now.
    /// Pure query; mutates nothing.
    pub fn ghost_drop_row(&self) -> Option<i8> {
        let active = self.active?;
        let cells = active.cells();

        let mut dist: i8 = 0;
        while !self.board.collides_at(active.x, active.y + dist + 1, &cells) {
            dist += 1;
        }
        Some(active.y + dist)
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Hard state reset: empty board, fresh bag cycle, cleared hold, zeroed
    /// counters, a new piece in play, phase `Running`.
    pub fn reset(&mut self) {
        self.board.clear();
        self.bag.clear();
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = self.config.base_drop_ms;
        self.drop_timer_ms = 0;
        self.active = None;
        self.next = self.bag.next();
        self.phase = Phase::Running;
        self.spawn_next();
    }

    /// Apply a game action, gated by the current phase.
    ///
    /// `NotStarted` and `GameOver` accept only a restart; `Paused` accepts
    /// resume (the pause toggle) and restart; `Running` accepts everything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.phase {
            Phase::NotStarted | Phase::GameOver => match action {
                GameAction::Restart => {
                    self.reset();
                    true
                }
                _ => false,
            },
            Phase::Paused => match action {
                GameAction::Pause => {
                    self.resume();
                    true
                }
                GameAction::Restart => {
                    self.reset();
                    true
                }
                _ => false,
            },
            Phase::Running => match action {
                GameAction::MoveLeft => self.move_piece(Direction::Left),
                GameAction::MoveRight => self.move_piece(Direction::Right),
                GameAction::SoftDrop => self.move_piece(Direction::Down),
                GameAction::HardDrop => {
                    self.hard_drop();
                    true
                }
                GameAction::RotateCw => self.rotate(true),
                GameAction::RotateCcw => self.rotate(false),
                GameAction::Hold => self.hold(),
                GameAction::Pause => {
                    self.pause();
                    true
                }
                GameAction::Restart => {
                    self.reset();
                    true
                }
            },
        }
    }

    /// Query-only view of everything a renderer needs
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cols: self.config.cols,
            visible_rows: self.config.visible_rows,
            hidden_rows: self.config.hidden_rows(),
            board: self.board.visible_window(self.config.visible_rows).to_vec(),
            active: self.active.map(|p| ActiveSnapshot {
                kind: p.kind,
                rotation: p.rotation,
                x: p.x,
                y: p.y,
                cells: p.cells(),
            }),
            ghost_row: self.ghost_drop_row(),
            hold: self.hold,
            next: self.next,
            can_hold: self.can_hold,
            phase: self.phase,
            score: self.score,
            level: self.level,
            lines: self.lines,
        }
    }

    /// Lock the active piece, resolve line clears and scoring, spawn next
    fn lock_active(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        self.board
            .lock(active.x, active.y, &active.cells(), active.kind);
        self.active = None;

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.score += line_points(cleared, self.level);
            self.lines += cleared as u32;

            let previous = self.level;
            self.level = level_for_lines(self.lines);
            if self.level > previous {
                self.drop_interval_ms = drop_interval_ms(self.level, self.config.base_drop_ms);
            }
        }

        self.spawn_next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        let mut e = GameEngine::new(GameConfig::default(), 12345);
        e.start();
        e
    }

    fn fill_row_except(e: &mut GameEngine, y: i8, open: &[i8]) {
        for x in 0..e.config.cols {
            if !open.contains(&x) {
                e.board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn new_engine_is_idle() {
        let e = GameEngine::new(GameConfig::default(), 1);
        assert_eq!(e.phase(), Phase::NotStarted);
        assert!(e.active().is_none());
        assert_eq!(e.score(), 0);
        assert_eq!(e.level(), 1);
        assert_eq!(e.lines(), 0);
        assert_eq!(e.drop_interval(), 1000);
    }

    #[test]
    fn start_spawns_and_runs() {
        let e = engine();
        assert_eq!(e.phase(), Phase::Running);
        assert!(e.active().is_some());
    }

    #[test]
    fn idle_engine_rejects_gameplay_commands() {
        let mut e = GameEngine::new(GameConfig::default(), 1);
        assert!(!e.apply_action(GameAction::MoveLeft));
        assert!(!e.apply_action(GameAction::HardDrop));
        assert!(!e.apply_action(GameAction::Pause));
        assert!(e.apply_action(GameAction::Restart));
        assert_eq!(e.phase(), Phase::Running);
    }

    #[test]
    fn spawn_positions_follow_the_reference_layout() {
        let cfg = GameConfig::default();

        let i = ActivePiece::spawn(PieceKind::I, &cfg);
        assert_eq!((i.x, i.y), (3, 20));

        let o = ActivePiece::spawn(PieceKind::O, &cfg);
        assert_eq!((o.x, o.y), (4, 21));

        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            let p = ActivePiece::spawn(kind, &cfg);
            assert_eq!((p.x, p.y), (3, 21), "{kind:?}");
            assert_eq!(p.rotation, Rotation::North);
        }
    }

    #[test]
    fn horizontal_moves_commit_or_revert() {
        let mut e = engine();
        let x0 = e.active().unwrap().x;

        assert!(e.move_piece(Direction::Right));
        assert_eq!(e.active().unwrap().x, x0 + 1);
        assert!(e.move_piece(Direction::Left));
        assert_eq!(e.active().unwrap().x, x0);

        // Push into the left wall; position sticks at the wall.
        for _ in 0..12 {
            e.move_piece(Direction::Left);
        }
        let x_wall = e.active().unwrap().x;
        assert!(!e.move_piece(Direction::Left));
        assert_eq!(e.active().unwrap().x, x_wall);
    }

    #[test]
    fn blocked_down_move_locks_and_spawns() {
        let mut e = engine();
        e.active = Some(ActivePiece {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 38,
        });

        assert!(!e.move_piece(Direction::Down));

        // O cells committed at rows 38-39.
        assert_eq!(e.board.get(0, 38), Some(Some(PieceKind::O)));
        assert_eq!(e.board.get(1, 39), Some(Some(PieceKind::O)));
        // A fresh piece is in play.
        assert!(e.active().is_some());
        assert_eq!(e.phase(), Phase::Running);
    }

    #[test]
    fn single_clear_scores_forty_at_level_one() {
        let mut e = engine();
        fill_row_except(&mut e, 39, &[4, 5]);
        fill_row_except(&mut e, 38, &[4, 5, 6]);
        e.active = Some(ActivePiece {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 4,
            y: 38,
        });

        e.hard_drop();

        assert_eq!(e.lines(), 1);
        assert_eq!(e.score(), 40);
        assert_eq!(e.level(), 1);
        // The partial remainder of row 38 slid down into row 39.
        assert!(!e.board.is_row_full(39));
        assert_eq!(e.board.get(6, 39), Some(None));
    }

    #[test]
    fn tetris_at_level_three_scores_3600() {
        let mut e = engine();
        e.lines = 25;
        e.level = 3;
        e.drop_interval_ms = drop_interval_ms(3, e.config.base_drop_ms);
        for y in 36..40 {
            fill_row_except(&mut e, y, &[5]);
        }
        // Vertical I occupies column x+2, four rows from y.
        e.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 3,
            y: 36,
        });

        e.hard_drop();

        assert_eq!(e.score(), 3600);
        assert_eq!(e.lines(), 29);
        assert_eq!(e.level(), 3);
        assert_eq!(e.drop_interval(), 800);
        assert!(e.board.cells().iter().all(|c| c.is_none()) || e.active().is_some());
    }

    #[test]
    fn crossing_ten_lines_raises_level_and_speeds_gravity() {
        let mut e = engine();
        e.lines = 9;
        fill_row_except(&mut e, 39, &[4, 5]);
        e.active = Some(ActivePiece {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 4,
            y: 38,
        });

        e.hard_drop();

        assert_eq!(e.lines(), 10);
        assert_eq!(e.level(), 2);
        assert_eq!(e.drop_interval(), 900);
        assert_eq!(e.score(), 40); // scored at the pre-clear level
    }

    #[test]
    fn rotation_failure_leaves_state_untouched() {
        let mut e = engine();
        // Box the piece in completely so every kick candidate collides.
        let p = ActivePiece {
            kind: PieceKind::S,
            rotation: Rotation::North,
            x: 3,
            y: 30,
        };
        e.active = Some(p);
        for y in 26..36 {
            for x in 0..e.config.cols {
                let covered = p
                    .cells()
                    .iter()
                    .any(|&(dx, dy)| (p.x + dx, p.y + dy) == (x, y));
                if !covered {
                    e.board.set(x, y, Some(PieceKind::J));
                }
            }
        }

        assert!(!e.rotate(true));
        assert_eq!(e.active(), Some(p));
        assert!(!e.rotate(false));
        assert_eq!(e.active(), Some(p));
    }

    #[test]
    fn o_piece_rotates_in_place() {
        let mut e = engine();
        e.active = Some(ActivePiece::spawn(PieceKind::O, &e.config));
        let before = e.active().unwrap();

        assert!(e.rotate(true));
        let after = e.active().unwrap();
        assert_eq!(after.rotation, Rotation::East);
        assert_eq!((after.x, after.y), (before.x, before.y));
        assert_eq!(after.cells(), before.cells());
    }

    #[test]
    fn hold_into_empty_slot_spawns_stored_next() {
        let mut e = engine();
        let first = e.active().unwrap().kind;
        let upcoming = e.next_piece();

        assert!(e.hold());
        assert_eq!(e.hold_piece(), Some(first));
        assert_eq!(e.active().unwrap().kind, upcoming);
        assert!(!e.can_hold());
    }

    #[test]
    fn second_hold_without_lock_is_a_no_op() {
        let mut e = engine();
        assert!(e.hold());
        let state = e.active();
        assert!(!e.hold());
        assert_eq!(e.active(), state);
    }

    #[test]
    fn hold_swap_respawns_at_canonical_spawn() {
        let mut e = engine();
        let first = e.active().unwrap().kind;
        e.hold();
        e.hard_drop();
        if e.phase() == Phase::GameOver {
            return;
        }

        assert!(e.can_hold());
        let outgoing = e.active().unwrap().kind;
        // Displace the piece so the swap position is observable.
        e.move_piece(Direction::Right);
        e.move_piece(Direction::Down);

        assert!(e.hold());
        assert_eq!(e.hold_piece(), Some(outgoing));
        let swapped = e.active().unwrap();
        assert_eq!(swapped.kind, first);
        assert_eq!(swapped, ActivePiece::spawn(first, &e.config));
    }

    #[test]
    fn hard_drop_locks_at_ghost_row() {
        let mut e = engine();
        let ghost = e.ghost_drop_row().unwrap();
        let kind = e.active().unwrap().kind;
        let x = e.active().unwrap().x;
        let cells = e.active().unwrap().cells();

        e.hard_drop();

        for (dx, dy) in cells {
            assert_eq!(e.board.get(x + dx, ghost + dy), Some(Some(kind)));
        }
    }

    #[test]
    fn ghost_query_does_not_mutate() {
        let e = engine();
        let before = e.active();
        let a = e.ghost_drop_row();
        let b = e.ghost_drop_row();
        assert_eq!(a, b);
        assert_eq!(e.active(), before);
    }

    #[test]
    fn gravity_fires_only_past_the_interval() {
        let mut e = engine();
        let y0 = e.active().unwrap().y;

        assert!(!e.tick(1000)); // exactly the interval: not yet
        assert_eq!(e.active().unwrap().y, y0);
        assert!(e.tick(1)); // accumulator now exceeds it
        assert_eq!(e.active().unwrap().y, y0 + 1);
        // Accumulator was reset.
        assert!(!e.tick(500));
        assert_eq!(e.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn blocked_spawn_is_game_over_with_no_piece_in_play() {
        let mut e = engine();
        // Column 0 stays open so the stack is never cleared as full rows.
        for y in 20..24 {
            fill_row_except(&mut e, y, &[0]);
        }

        e.hard_drop(); // lock current piece; the next spawn is blocked

        assert_eq!(e.phase(), Phase::GameOver);
        assert!(e.active().is_none());
        assert!(!e.tick(10_000));
        assert!(!e.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn pause_gates_gameplay_and_toggles_back() {
        let mut e = engine();
        assert!(e.apply_action(GameAction::Pause));
        assert_eq!(e.phase(), Phase::Paused);
        assert!(!e.apply_action(GameAction::MoveRight));
        assert!(!e.tick(5000));

        assert!(e.apply_action(GameAction::Pause));
        assert_eq!(e.phase(), Phase::Running);
    }

    #[test]
    fn reset_restores_a_fresh_running_game() {
        let mut e = engine();
        e.hold();
        e.hard_drop();
        e.score = 999;
        e.lines = 42;
        e.level = 5;
        e.drop_interval_ms = 600;

        e.reset();

        assert_eq!(e.phase(), Phase::Running);
        assert_eq!(e.score(), 0);
        assert_eq!(e.lines(), 0);
        assert_eq!(e.level(), 1);
        assert_eq!(e.drop_interval(), 1000);
        assert!(e.hold_piece().is_none());
        assert!(e.can_hold());
        assert!(e.active().is_some());
        let occupied: usize = e
            .board
            .cells()
            .iter()
            .filter(|c| c.is_some())
            .count();
        assert_eq!(occupied, 0);
    }

    #[test]
    fn reset_leaves_game_over() {
        let mut e = engine();
        for y in 20..24 {
            fill_row_except(&mut e, y, &[0]);
        }
        e.hard_drop();
        assert_eq!(e.phase(), Phase::GameOver);

        assert!(e.apply_action(GameAction::Restart));
        assert_eq!(e.phase(), Phase::Running);
        assert!(e.active().is_some());
    }

    #[test]
    fn snapshot_reflects_engine_state() {
        let e = engine();
        let snap = e.snapshot();

        assert_eq!(snap.cols, 10);
        assert_eq!(snap.visible_rows, 20);
        assert_eq!(snap.board.len(), 200);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.next, e.next_piece());
        assert_eq!(snap.score, 0);
        assert_eq!(snap.level, 1);

        let active = snap.active.expect("running game has an active piece");
        assert_eq!(active.cells.len(), 4);
        assert_eq!(snap.ghost_row, e.ghost_drop_row());
    }

    #[test]
    fn small_board_variant_plays() {
        let cfg = GameConfig {
            cols: 6,
            rows: 12,
            visible_rows: 8,
            ..GameConfig::default()
        };
        let mut e = GameEngine::new(cfg, 7);
        e.start();
        assert!(e.active().is_some());
        e.hard_drop();
        // Locked somewhere inside the 6x12 grid.
        assert!(e.board.cells().iter().any(|c| c.is_some()));
    }
}
