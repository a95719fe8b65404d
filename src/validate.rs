//! Connectivity checks: per-cell fit, whole-board completion, and an
//! incremental tracker that keeps the completion flag current across moves.

use crate::model::{Board, Direction};

/// A cell fits when every occupied neighbour agrees with it on the shared edge:
/// path meets path, or wall meets wall. Empty cells and grid borders always fit.
pub fn is_tile_fitting(board: &Board, row: usize, col: usize) -> bool {
    let Some(tile) = board.get(row, col) else { return true };
    Direction::ALL.iter().all(|&d| {
        match board.neighbor(row, col, d).and_then(|(nr, nc)| board.get(nr, nc)) {
            Some(other) => tile.has_path_to(d) == other.has_path_to(d.opposite()),
            None => true,
        }
    })
}

pub fn is_board_complete(board: &Board) -> bool {
    board.cells().all(|((row, col), _)| is_tile_fitting(board, row, col))
}

/// Cached per-cell fit flags for one board.
///
/// After a single cell changes, only that cell and its four neighbours can
/// change their fit, so [`FitTracker::refresh_around`] re-checks just those.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FitTracker {
    cols: usize,
    fits: Vec<bool>,
    misfits: usize,
}

impl FitTracker {
    pub fn new(board: &Board) -> Self {
        let fits: Vec<bool> = board.cells().map(|((r, c), _)| is_tile_fitting(board, r, c)).collect();
        let misfits = fits.iter().filter(|f| !**f).count();
        Self { cols: board.cols(), fits, misfits }
    }

    /// Re-check `(row, col)` and its neighbours after that cell changed.
    pub fn refresh_around(&mut self, board: &Board, row: usize, col: usize) {
        self.refresh(board, row, col);
        for d in Direction::ALL {
            if let Some((nr, nc)) = board.neighbor(row, col, d) {
                self.refresh(board, nr, nc);
            }
        }
    }

    fn refresh(&mut self, board: &Board, row: usize, col: usize) {
        let i = row * self.cols + col;
        let fits = is_tile_fitting(board, row, col);
        match (self.fits[i], fits) {
            (true, false) => self.misfits += 1,
            (false, true) => self.misfits -= 1,
            _ => {}
        }
        self.fits[i] = fits;
    }

    pub fn is_fitting(&self, row: usize, col: usize) -> bool {
        col < self.cols && self.fits.get(row * self.cols + col).copied().unwrap_or(true)
    }

    /// Number of cells that currently clash with a neighbour.
    pub fn misfits(&self) -> usize {
        self.misfits
    }

    pub fn is_complete(&self) -> bool {
        self.misfits == 0
    }
}
