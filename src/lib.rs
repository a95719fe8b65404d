//! Maze Repair: seeded generation, shuffling and validation of rotatable path-tile puzzles.
//!
//! A [`TileCatalog`] and a [`SeededRng`] feed [`generate`], which fills a
//! [`Board`] by backtracking; [`shuffle`] scrambles it, and a
//! [`BoardSession`] takes player rotations until every tile fits.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod rng;
pub mod state;
pub mod util;
pub mod validate;

pub use catalog::{TileCatalog, TileDescriptor};
pub use config::GameConfig;
pub use error::{GenerationFailure, MazeError, Result};
pub use generator::{GenerationBudget, generate, generate_with_budget, shuffle};
pub use model::{Board, Direction, Tile};
pub use rng::{RandomSource, SeededRng, canonicalize_seed};
pub use state::{BoardSession, CompletionStats, MoveOutcome, SessionAction, SessionStatus};
pub use validate::{FitTracker, is_board_complete, is_tile_fitting};
