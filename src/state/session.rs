//! Board session: the grid the player is rotating, the grid it started from,
//! and the move/completion bookkeeping around them.

use crate::catalog::TileCatalog;
use crate::config::GameConfig;
use crate::error::{GenerationFailure, MazeError, Result};
use crate::generator::{generate_with_budget, shuffle};
use crate::model::Board;
use crate::rng::{RandomSource, SeededRng};
use crate::validate::FitTracker;
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Unsolved,
    /// Terminal until the host resets or regenerates.
    Solved,
}

/// What a rotation request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Locked, already solved, out of range, or an empty cell.
    Ignored,
    Moved,
    /// This move completed the board.
    Solved,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardSession {
    catalog: Rc<TileCatalog>,
    config: GameConfig,
    board: Board,
    /// Snapshot taken right after generation and shuffle; `reset` restores it.
    starting_board: Board,
    fit: FitTracker,
    move_count: u32,
    status: SessionStatus,
    /// Host-controlled input lock (e.g. while a completion dialog is open).
    locked: bool,
    /// Canonical seed of the current puzzle; `None` for boards installed with `load`.
    seed: Option<String>,
    /// Bumped on every state change so views can key effects on it.
    version: u64,
}

impl BoardSession {
    /// Start a session on a freshly generated puzzle described by `config`.
    pub fn new(catalog: Rc<TileCatalog>, config: GameConfig) -> Result<Self> {
        config.validate()?;
        let (rows, cols, seed) = (config.rows, config.cols, config.seed.clone());
        let placeholder = Board::new(rows, cols)?;
        let mut session = Self::with_board(catalog, config, placeholder);
        session.regenerate(rows, cols, &seed)?;
        Ok(session)
    }

    /// Start a session on an existing board, which also becomes the starting board.
    pub fn from_board(catalog: Rc<TileCatalog>, config: GameConfig, board: Board) -> Self {
        Self::with_board(catalog, config, board)
    }

    fn with_board(catalog: Rc<TileCatalog>, config: GameConfig, board: Board) -> Self {
        let fit = FitTracker::new(&board);
        Self {
            catalog,
            config,
            starting_board: board.clone(),
            board,
            fit,
            move_count: 0,
            status: SessionStatus::Unsolved,
            locked: false,
            seed: None,
            version: 0,
        }
    }

    fn install(&mut self, board: Board, seed: Option<String>) {
        self.fit = FitTracker::new(&board);
        self.starting_board = board.clone();
        self.board = board;
        self.move_count = 0;
        self.status = SessionStatus::Unsolved;
        self.seed = seed;
        self.version += 1;
    }

    /// Turn the tile at `(row, col)` one quarter clockwise.
    pub fn apply_rotation(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.locked || self.status == SessionStatus::Solved {
            return MoveOutcome::Ignored;
        }
        let Some(tile) = self.board.get(row, col) else {
            return MoveOutcome::Ignored;
        };
        let rotated = tile.rotate(1);
        self.board.set(row, col, Some(rotated));
        self.move_count += 1;
        self.version += 1;
        self.fit.refresh_around(&self.board, row, col);
        log::debug!("rotate tile: (row = {row}, col = {col}), misfits = {}", self.fit.misfits());

        if self.fit.is_complete() {
            self.status = SessionStatus::Solved;
            log::info!("board solved in {} moves", self.move_count);
            return MoveOutcome::Solved;
        }
        MoveOutcome::Moved
    }

    /// Restore the starting board. Returns false (and does nothing) while locked.
    pub fn reset(&mut self) -> bool {
        if self.locked {
            return false;
        }
        let seed = self.seed.take();
        self.install(self.starting_board.clone(), seed);
        log::debug!("board reset");
        true
    }

    /// Generate, shuffle and install a new puzzle for `seed`.
    ///
    /// Attempts that run out of generation budget are retried on the same
    /// random stream, up to `max_generation_attempts`. A board that cannot be
    /// filled at all is reported straight away.
    pub fn regenerate(&mut self, rows: usize, cols: usize, seed: &str) -> Result<()> {
        let mut rng = SeededRng::from_seed(seed)?;
        let mut attempt = 1;
        let mut board = loop {
            match generate_with_budget(rows, cols, &self.catalog, &mut rng, self.config.budget()) {
                Ok(board) => break board,
                Err(MazeError::GenerationFailure(failure @ GenerationFailure::BudgetExceeded { .. }))
                    if attempt < self.config.max_generation_attempts =>
                {
                    attempt += 1;
                    log::info!("Re-generating board ({failure}), attempt {attempt}");
                }
                Err(e) => return Err(e),
            }
        };
        shuffle(&mut board, &mut rng);
        log::info!("new {rows}x{cols} puzzle for seed {}", rng.seed());
        self.install(board, Some(rng.seed().to_string()));
        Ok(())
    }

    /// Install an externally supplied board as both current and starting board.
    pub fn load(&mut self, board: Board) {
        self.install(board, None);
    }

    /// Re-scramble the current board's rotations. The starting board is kept.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) -> bool {
        if self.locked {
            return false;
        }
        shuffle(&mut self.board, rng);
        self.fit = FitTracker::new(&self.board);
        self.status = SessionStatus::Unsolved;
        self.version += 1;
        true
    }

    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            self.locked = locked;
            self.version += 1;
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn starting_board(&self) -> &Board {
        &self.starting_board
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whether every tile currently fits its neighbours.
    pub fn is_complete(&self) -> bool {
        self.fit.is_complete()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum SessionAction {
    Rotate { row: usize, col: usize },
    Reset,
    Regenerate { rows: usize, cols: usize, seed: String },
    Load(Board),
    SetLocked(bool),
}

impl Reducible for BoardSession {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            Rotate { row, col } => {
                if new.apply_rotation(row, col) == MoveOutcome::Ignored {
                    return self;
                }
            }
            Reset => {
                if !new.reset() {
                    return self;
                }
            }
            Regenerate { rows, cols, seed } => {
                if let Err(e) = new.regenerate(rows, cols, &seed) {
                    log::error!("could not generate a {rows}x{cols} board for seed {seed:?}: {e}");
                    return self;
                }
            }
            Load(board) => new.load(board),
            SetLocked(locked) => new.set_locked(locked),
        }
        Rc::new(new)
    }
}
