// Errors raised while assembling the simulation tables.

use rinksim_core::weighted::WeightError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("injury catalog is empty")]
    EmptyInjuryCatalog,

    #[error("injury '{name}' has an invalid range {min_games}..={max_games} (need min <= max)")]
    InvalidInjuryRange {
        name: String,
        min_games: u32,
        max_games: u32,
    },

    #[error("goal minute {minute} is outside 0..=59")]
    InvalidGoalMinute { minute: u32 },

    #[error("goal-minute weights: {0}")]
    GoalMinuteWeights(#[from] WeightError),
}
