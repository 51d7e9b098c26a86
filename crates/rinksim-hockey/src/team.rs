// One team's collective output for a game.

use std::collections::HashMap;

use rand::Rng;

use crate::accumulator::{SkaterDelta, SkaterLine};
use crate::game::GameContext;
use crate::model::{AssistLine, GoalEvent, InjuryReport, InjuryState, PlayerKey, ScorerLine, Skater};
use crate::skater::{play_skater, SkaterGame};

/// Every skater's line for one team in one game, plus team totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGame {
    pub team: String,
    /// Roster order.
    pub skaters: Vec<SkaterGame>,
    pub shots: u32,
    /// Regulation goals.
    pub goals: u32,
    pub hits: u32,
    pub blocks: u32,
}

/// Simulate every skater on `roster` against a goalie with
/// `opponent_save_pct`. `roster` is the team's merged snapshot.
pub fn estimate_team<R: Rng + ?Sized>(
    team: &str,
    roster: &[Skater],
    opponent_save_pct: f64,
    ctx: &GameContext<'_>,
    rng: &mut R,
) -> TeamGame {
    let skaters: Vec<SkaterGame> = roster
        .iter()
        .map(|s| play_skater(s, roster, opponent_save_pct, ctx, rng))
        .collect();

    let shots = skaters.iter().map(|s| s.shots).sum();
    let goals = skaters.iter().map(|s| s.goals.len() as u32).sum();
    let hits = skaters.iter().map(|s| s.hits).sum();
    let blocks = skaters.iter().map(|s| s.blocks).sum();

    TeamGame {
        team: team.to_string(),
        skaters,
        shots,
        goals,
        hits,
        blocks,
    }
}

impl TeamGame {
    /// All goals, ordered by game clock.
    pub fn scoring(&self) -> Vec<GoalEvent> {
        let mut events: Vec<GoalEvent> = self
            .skaters
            .iter()
            .flat_map(|s| s.goals.iter().cloned())
            .collect();
        events.sort_by_key(|e| e.time);
        events
    }

    pub fn scorers(&self) -> Vec<ScorerLine> {
        self.skaters
            .iter()
            .filter(|s| !s.goals.is_empty())
            .map(|s| ScorerLine {
                name: s.name.clone(),
                position: s.position,
                goals: s.goals.len() as u32,
            })
            .collect()
    }

    /// Primary and secondary assists per skater name, taken from the goal
    /// events: slot 0 is primary, slot 1 secondary.
    fn assist_counts(&self) -> HashMap<&str, (u32, u32)> {
        let mut counts: HashMap<&str, (u32, u32)> = HashMap::new();
        for event in self.skaters.iter().flat_map(|s| s.goals.iter()) {
            for (slot, name) in event.assists.iter().enumerate() {
                let entry = counts.entry(name.as_str()).or_default();
                if slot == 0 {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }
        counts
    }

    /// Skaters credited with at least one assist, in roster order.
    pub fn assists(&self) -> Vec<AssistLine> {
        let counts = self.assist_counts();
        self.skaters
            .iter()
            .filter_map(|s| {
                counts.get(s.name.as_str()).map(|&(primary, secondary)| AssistLine {
                    name: s.name.clone(),
                    primary_assists: primary,
                    secondary_assists: secondary,
                })
            })
            .collect()
    }

    pub fn newly_injured(&self) -> Vec<InjuryReport> {
        self.skaters
            .iter()
            .filter(|s| s.newly_injured)
            .filter_map(|s| match &s.injury {
                InjuryState::Injured { injury, games_left } => Some(InjuryReport {
                    name: s.name.clone(),
                    position: s.position,
                    injury: injury.clone(),
                    games_out: *games_left,
                }),
                InjuryState::Healthy => None,
            })
            .collect()
    }

    /// Accumulator deltas for every skater on the roster. Skaters who sat
    /// out, or were hurt during this game, carry only their injury state.
    pub fn deltas(&self) -> Vec<SkaterDelta> {
        let counts = self.assist_counts();
        self.skaters
            .iter()
            .map(|s| {
                let line = (s.dressed && !s.newly_injured).then(|| {
                    let (primary, secondary) =
                        counts.get(s.name.as_str()).copied().unwrap_or_default();
                    SkaterLine {
                        games_played: 1,
                        shots: s.shots,
                        goals: s.goals.len() as u32,
                        primary_assists: primary,
                        secondary_assists: secondary,
                        hits: s.hits,
                        blocks: s.blocks,
                    }
                });
                SkaterDelta {
                    key: PlayerKey::new(s.name.clone(), self.team.clone()),
                    position: s.position,
                    line,
                    injury: s.injury.clone(),
                }
            })
            .collect()
    }
}
