// Season-to-date totals per (player, team), layered on top of the loaded
// historical rates to form each game's roster snapshot.

use std::collections::HashMap;
use std::ops::AddAssign;

use serde::Serialize;

use crate::model::{Goalie, GoalieStats, InjuryState, PlayerKey, Position, Skater, SkaterStats};

// ---------------------------------------------------------------------------
// Per-game deltas
// ---------------------------------------------------------------------------

/// Counting stats a skater adds in one game (or has added so far).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkaterLine {
    pub games_played: u32,
    pub shots: u32,
    pub goals: u32,
    pub primary_assists: u32,
    pub secondary_assists: u32,
    pub hits: u32,
    pub blocks: u32,
}

impl SkaterLine {
    pub fn assists(&self) -> u32 {
        self.primary_assists + self.secondary_assists
    }
}

impl AddAssign for SkaterLine {
    fn add_assign(&mut self, rhs: Self) {
        self.games_played += rhs.games_played;
        self.shots += rhs.shots;
        self.goals += rhs.goals;
        self.primary_assists += rhs.primary_assists;
        self.secondary_assists += rhs.secondary_assists;
        self.hits += rhs.hits;
        self.blocks += rhs.blocks;
    }
}

/// Counting stats a goalie adds in one game (or has added so far).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalieLine {
    pub games_played: u32,
    pub goals_against: u32,
    pub shots_against: u32,
    pub shutouts: u32,
    pub wins: u32,
}

impl GoalieLine {
    pub fn saves(&self) -> u32 {
        self.shots_against.saturating_sub(self.goals_against)
    }
}

impl AddAssign for GoalieLine {
    fn add_assign(&mut self, rhs: Self) {
        self.games_played += rhs.games_played;
        self.goals_against += rhs.goals_against;
        self.shots_against += rhs.shots_against;
        self.shutouts += rhs.shutouts;
        self.wins += rhs.wins;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkaterDelta {
    pub key: PlayerKey,
    pub position: Position,
    /// `None` when the skater did not dress.
    pub line: Option<SkaterLine>,
    /// Injury state after the game.
    pub injury: InjuryState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalieDelta {
    pub key: PlayerKey,
    pub line: GoalieLine,
}

/// Everything one game changes in the season state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameDeltas {
    pub skaters: Vec<SkaterDelta>,
    pub goalies: Vec<GoalieDelta>,
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SkaterEntry {
    pub name: String,
    pub team: String,
    pub position: Position,
    pub totals: SkaterLine,
    pub injury: InjuryState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalieEntry {
    pub name: String,
    pub team: String,
    pub totals: GoalieLine,
    pub injury: InjuryState,
}

/// Simulated season totals, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct SeasonAccumulator {
    skaters: Vec<SkaterEntry>,
    skater_index: HashMap<PlayerKey, usize>,
    goalies: Vec<GoalieEntry>,
    goalie_index: HashMap<PlayerKey, usize>,
}

impl SeasonAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skaters(&self) -> &[SkaterEntry] {
        &self.skaters
    }

    pub fn goalies(&self) -> &[GoalieEntry] {
        &self.goalies
    }

    pub fn skater(&self, key: &PlayerKey) -> Option<&SkaterEntry> {
        self.skater_index.get(key).map(|&i| &self.skaters[i])
    }

    pub fn goalie(&self, key: &PlayerKey) -> Option<&GoalieEntry> {
        self.goalie_index.get(key).map(|&i| &self.goalies[i])
    }

    /// Base rates plus everything simulated so far, with the current injury
    /// state.
    pub fn skater_snapshot(&self, base: &Skater) -> Skater {
        match self.skater(&base.key()) {
            Some(entry) => Skater {
                stats: merge_skater(&base.stats, &entry.totals),
                injury: entry.injury.clone(),
                ..base.clone()
            },
            None => base.clone(),
        }
    }

    pub fn goalie_snapshot(&self, base: &Goalie) -> Goalie {
        match self.goalie(&base.key()) {
            Some(entry) => Goalie {
                stats: merge_goalie(&base.stats, &entry.totals),
                injury: entry.injury.clone(),
                ..base.clone()
            },
            None => base.clone(),
        }
    }

    /// Simulated goals per skater-game for `team`, counting `pending` deltas
    /// that have not been committed yet. Zero before the team has played.
    pub fn team_goal_rate(&self, team: &str, pending: &[SkaterDelta]) -> f64 {
        let committed = self
            .skaters
            .iter()
            .filter(|e| e.team == team)
            .map(|e| (e.totals.goals, e.totals.games_played));
        let uncommitted = pending
            .iter()
            .filter(|d| d.key.team == team)
            .filter_map(|d| d.line.map(|l| (l.goals, l.games_played)));

        let (goals, games) = committed
            .chain(uncommitted)
            .fold((0u64, 0u64), |(g, n), (dg, dn)| (g + dg as u64, n + dn as u64));
        if games > 0 {
            goals as f64 / games as f64
        } else {
            0.0
        }
    }

    /// Apply one game's deltas.
    ///
    /// An entry is created on a player's first stat line. Injury state is
    /// always carried forward for known players so countdowns continue
    /// while they sit out.
    pub fn commit(&mut self, deltas: &GameDeltas) {
        for delta in &deltas.skaters {
            let idx = match self.skater_index.get(&delta.key) {
                Some(&i) => i,
                None => {
                    if delta.line.is_none() && delta.injury.is_healthy() {
                        continue;
                    }
                    self.skaters.push(SkaterEntry {
                        name: delta.key.name.clone(),
                        team: delta.key.team.clone(),
                        position: delta.position,
                        totals: SkaterLine::default(),
                        injury: InjuryState::Healthy,
                    });
                    self.skater_index.insert(delta.key.clone(), self.skaters.len() - 1);
                    self.skaters.len() - 1
                }
            };
            let entry = &mut self.skaters[idx];
            if let Some(line) = delta.line {
                entry.totals += line;
            }
            entry.injury = delta.injury.clone();
        }

        for delta in &deltas.goalies {
            let idx = match self.goalie_index.get(&delta.key) {
                Some(&i) => i,
                None => {
                    self.goalies.push(GoalieEntry {
                        name: delta.key.name.clone(),
                        team: delta.key.team.clone(),
                        totals: GoalieLine::default(),
                        injury: InjuryState::Healthy,
                    });
                    self.goalie_index.insert(delta.key.clone(), self.goalies.len() - 1);
                    self.goalies.len() - 1
                }
            };
            self.goalies[idx].totals += delta.line;
        }
    }
}

fn merge_skater(base: &SkaterStats, totals: &SkaterLine) -> SkaterStats {
    SkaterStats {
        games_played: base.games_played + totals.games_played as f64,
        shots: base.shots + totals.shots as f64,
        goals: base.goals + totals.goals as f64,
        primary_assists: base.primary_assists + totals.primary_assists as f64,
        secondary_assists: base.secondary_assists + totals.secondary_assists as f64,
        hits: base.hits + totals.hits as f64,
        blocks: base.blocks + totals.blocks as f64,
    }
}

fn merge_goalie(base: &GoalieStats, totals: &GoalieLine) -> GoalieStats {
    GoalieStats {
        games_played: base.games_played + totals.games_played as f64,
        goals_against: base.goals_against + totals.goals_against as f64,
        unblocked_shots: base.unblocked_shots + totals.shots_against as f64,
        shutouts: base.shutouts + totals.shutouts as f64,
        wins: base.wins + totals.wins as f64,
    }
}
