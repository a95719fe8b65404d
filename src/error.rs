use thiserror::Error;

/// Why a generation attempt gave up.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationFailure {
    #[error("no tile arrangement fits a {rows}x{cols} board")]
    Exhausted { rows: usize, cols: usize },
    #[error("gave up after {steps} candidate placements")]
    BudgetExceeded { steps: u64 },
}

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid catalog entry `{id}`: {reason}")]
    InvalidCatalogEntry { id: String, reason: String },
    #[error("tile catalog is empty")]
    EmptyCatalog,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown tile id `{0}`")]
    UnknownTile(String),
    #[error("board generation failed: {0}")]
    GenerationFailure(#[from] GenerationFailure),
    #[error("seed is empty after removing non-alphanumeric characters")]
    InvalidSeed,
    #[error("({dx}, {dy}) is not a unit offset")]
    InvalidOffset { dx: i32, dy: i32 },
    #[error("board must have at least one row and column, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("board expected {expected} cells, found {found}")]
    CellCountMismatch { expected: usize, found: usize },
    #[error("rotation {0} is not in 0..4")]
    InvalidRotation(u8),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
