use crate::error::{MazeError, Result};
use crate::generator::GenerationBudget;
use serde::{Deserialize, Serialize};

/// Settings for a puzzle session. Every field has a default, so a partial
/// JSON object (or `{}`) is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: String,
    /// Max candidate placements per generation attempt; `None` for no limit.
    pub generation_budget: Option<u64>,
    /// How many attempts a session makes before reporting a generation failure.
    pub max_generation_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            seed: "ABCDE12345".to_string(),
            generation_budget: Some(1_000_000),
            max_generation_attempts: 8,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidDimensions { rows: self.rows, cols: self.cols });
        }
        if self.max_generation_attempts == 0 {
            return Err(MazeError::InvalidConfig("max_generation_attempts must be at least 1".into()));
        }
        if self.generation_budget == Some(0) {
            return Err(MazeError::InvalidConfig("generation_budget must be positive".into()));
        }
        Ok(())
    }

    pub fn budget(&self) -> GenerationBudget {
        GenerationBudget { max_steps: self.generation_budget }
    }
}
