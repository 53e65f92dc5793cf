//! Game engine - owns the grid, the current and next pieces, and the piece source
//!
//! Commands (`move_left`, `rotate`, `hard_drop`, ...) are validated and applied
//! immediately; rejected commands leave the state untouched and return `false`.
//! [`GameEngine::advance`] drives gravity with a fixed interval, locking the piece when a
//! forced step fails. The only terminal state is [`Phase::GameOver`], entered when a newly
//! promoted piece does not fit at its spawn position.

use log::{debug, info, trace};

use crate::grid::Grid;
use crate::pieces::Piece;
use crate::placement::{fits, is_valid};
use crate::rng::{PieceSource, RandomSource};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{GameAction, Phase, FALL_INTERVAL_SECS, POINTS_PER_LINE};

/// Complete game state
#[derive(Debug)]
pub struct GameEngine {
    grid: Grid,
    current: Piece,
    next: Piece,
    source: Box<dyn PieceSource>,
    score: u32,
    lines: u32,
    /// Seconds elapsed since the last forced downward step
    fall_accumulator: f64,
    phase: Phase,
}

impl GameEngine {
    /// Create a new game drawing uniformly random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(RandomSource::new(seed)))
    }

    /// Create a new game with a caller-supplied piece source
    pub fn with_source(mut source: Box<dyn PieceSource>) -> Self {
        let current = source.next_piece();
        let next = source.next_piece();

        Self {
            grid: Grid::new(),
            current,
            next,
            source,
            score: 0,
            lines: 0,
            fall_accumulator: 0.0,
            phase: Phase::Running,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for puzzle setups and test harnesses.
    ///
    /// Gameplay never needs this; commands are the only way a running game changes.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rows cleared since the last restart
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn fall_accumulator(&self) -> f64 {
        self.fall_accumulator
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.current = PieceSnapshot::from(self.current);
        out.next = PieceSnapshot::from(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Try to move the current piece by `(dx, dy)`
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.is_game_over() {
            return false;
        }

        let candidate = self.current.shifted(dx, dy);
        if !fits(&candidate, &self.grid) {
            return false;
        }

        self.current = candidate;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move the current piece down one row (does not lock)
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate the current piece 90° clockwise around its unchanged anchor
    pub fn rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        let candidate = self.current.rotated_shape();
        if !is_valid(&candidate, self.current.x, self.current.y, &self.grid) {
            trace!(
                "rotation of {:?} at ({}, {}) rejected",
                self.current.kind,
                self.current.x,
                self.current.y
            );
            return false;
        }

        self.current.shape = candidate;
        true
    }

    /// Drop the current piece to the lowest reachable row and lock it.
    ///
    /// Returns false only when the game is already over.
    pub fn hard_drop(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        while self.try_move(0, 1) {}
        self.lock();
        true
    }

    /// Lock the current piece where it stands and return the rows cleared.
    ///
    /// Gameplay locks through [`hard_drop`](Self::hard_drop) and gravity; this entry point
    /// exists for harnesses that stage a piece by hand.
    pub fn force_lock(&mut self) -> usize {
        if self.is_game_over() {
            return 0;
        }
        self.lock()
    }

    /// Merge, clear, score, then promote the next piece into play
    fn lock(&mut self) -> usize {
        let locked = self.current;
        self.grid.merge(&locked);

        let cleared = self.grid.clear_full_rows().len();
        if cleared > 0 {
            let award = (cleared as u32).saturating_mul(POINTS_PER_LINE);
            self.score = self.score.saturating_add(award);
            self.lines = self.lines.saturating_add(cleared as u32);
            debug!(
                "cleared {} row(s), +{} points, score {}",
                cleared, award, self.score
            );
        }

        self.current = std::mem::replace(&mut self.next, self.source.next_piece());
        debug!(
            "locked {:?} ({}) at ({}, {}); now playing {:?}, next {:?}",
            locked.kind,
            locked.color().as_str(),
            locked.x,
            locked.y,
            self.current.kind,
            self.next.kind
        );

        if !fits(&self.current, &self.grid) {
            self.phase = Phase::GameOver;
            info!(
                "game over: {:?} blocked at spawn, final score {}",
                self.current.kind, self.score
            );
        }

        cleared
    }

    /// Reset to a fresh game. Valid in either phase.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.current = self.source.next_piece();
        self.next = self.source.next_piece();
        self.score = 0;
        self.lines = 0;
        self.fall_accumulator = 0.0;
        self.phase = Phase::Running;
        info!("game restarted");
    }

    /// Advance gravity by `dt` seconds.
    ///
    /// Each full interval moves the piece down one row. When a forced step fails the
    /// piece is locked, the remaining time is discarded and no further steps run during
    /// this call, so the new piece always starts with an empty accumulator. Returns true
    /// if any gravity step ran.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.is_game_over() {
            return false;
        }

        if dt.is_finite() && dt > 0.0 {
            self.fall_accumulator += dt;
        }

        let mut stepped = false;
        while self.fall_accumulator >= FALL_INTERVAL_SECS {
            self.fall_accumulator -= FALL_INTERVAL_SECS;
            stepped = true;
            if !self.try_move(0, 1) {
                self.lock();
                self.fall_accumulator = 0.0;
                break;
            }
        }

        stepped
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
