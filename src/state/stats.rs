//! Completion statistics across finished puzzles. Storage is the host's job;
//! this only models the numbers and their JSON form.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total_completions: u32,
    pub total_moves: u64,
    /// Seed of the most recent daily puzzle that was solved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solved_puzzle_for_day: Option<String>,
}

impl CompletionStats {
    pub fn record(&mut self, move_count: u32, puzzle_for_day: Option<&str>) {
        self.total_completions = self.total_completions.saturating_add(1);
        self.total_moves = self.total_moves.saturating_add(move_count as u64);
        if let Some(day) = puzzle_for_day {
            self.solved_puzzle_for_day = Some(day.to_string());
        }
    }

    /// Mean moves per completed puzzle; 0 before the first completion.
    pub fn average_moves(&self) -> f64 {
        if self.total_completions == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.total_completions as f64
        }
    }

    pub fn solved_day(&self, day: &str) -> bool {
        self.solved_puzzle_for_day.as_deref() == Some(day)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
