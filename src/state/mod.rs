pub mod session;
pub mod stats;

pub use session::{BoardSession, MoveOutcome, SessionAction, SessionStatus};
pub use stats::CompletionStats;
