//! Board generation by row-major backtracking, and the post-generation shuffle
//! that scrambles tile rotations into a puzzle.

use crate::catalog::TileCatalog;
use crate::error::{GenerationFailure, Result};
use crate::model::Board;
use crate::rng::{RandomSource, shuffle_with_rng};
use crate::validate::is_tile_fitting;

/// Upper bound on candidate placements for one generation attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationBudget {
    /// `None` searches until the board is filled or the root cell runs out of candidates.
    pub max_steps: Option<u64>,
}

impl GenerationBudget {
    pub const UNLIMITED: GenerationBudget = GenerationBudget { max_steps: None };

    pub fn steps(max_steps: u64) -> Self {
        Self { max_steps: Some(max_steps) }
    }
}

/// Candidate order for one cell and how far through it the search has got.
struct Frame {
    order: Vec<usize>,
    next: usize,
}

impl Frame {
    fn enter(pool_len: usize, rng: &mut dyn RandomSource) -> Self {
        let mut order: Vec<usize> = (0..pool_len).collect();
        shuffle_with_rng(&mut order, rng);
        Self { order, next: 0 }
    }
}

/// Fill a `rows` x `cols` board so that every tile fits its neighbours.
pub fn generate(rows: usize, cols: usize, catalog: &TileCatalog, rng: &mut dyn RandomSource) -> Result<Board> {
    generate_with_budget(rows, cols, catalog, rng, GenerationBudget::UNLIMITED)
}

/// Depth-first search over cells in row-major order.
///
/// Each cell visit draws a fresh shuffle of the whole pool and places the first
/// candidate that fits the tiles above and to the left. A cell with no fitting
/// candidate is cleared and the search resumes the previous cell's candidate
/// list. Candidates are placed as defined in the catalog, never rotated.
pub fn generate_with_budget(
    rows: usize,
    cols: usize,
    catalog: &TileCatalog,
    rng: &mut dyn RandomSource,
    budget: GenerationBudget,
) -> Result<Board> {
    let mut board = Board::new(rows, cols)?;
    let pool = catalog.pool();
    let cells = rows * cols;
    log::debug!("generating {rows}x{cols} board from a pool of {}", pool.len());

    let mut frames = vec![Frame::enter(pool.len(), rng)];
    let mut steps: u64 = 0;
    loop {
        let cell = frames.len() - 1;
        let (row, col) = (cell / cols, cell % cols);
        let mut placed = false;
        if let Some(frame) = frames.last_mut() {
            while frame.next < frame.order.len() {
                let candidate = frame.order[frame.next];
                frame.next += 1;
                steps += 1;
                if budget.max_steps.is_some_and(|max| steps > max) {
                    log::warn!("board generation gave up after {} placements", steps - 1);
                    return Err(GenerationFailure::BudgetExceeded { steps: steps - 1 }.into());
                }
                board.set(row, col, Some(pool[candidate].clone()));
                if is_tile_fitting(&board, row, col) {
                    placed = true;
                    break;
                }
            }
        }

        if placed {
            if cell + 1 == cells {
                log::debug!("generated {rows}x{cols} board in {steps} placements");
                return Ok(board);
            }
            frames.push(Frame::enter(pool.len(), rng));
        } else {
            board.set(row, col, None);
            frames.pop();
            if frames.is_empty() {
                log::warn!("no arrangement of the tile pool fills a {rows}x{cols} board");
                return Err(GenerationFailure::Exhausted { rows, cols }.into());
            }
        }
    }
}

/// Turn every tile by a random number of quarter-turns, one draw per tile in
/// row-major order. Fit is not re-checked.
pub fn shuffle(board: &mut Board, rng: &mut dyn RandomSource) {
    board.map_tiles(|_, _, tile| tile.rotate(rng.next_below(4) as u32));
}
