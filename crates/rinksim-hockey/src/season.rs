// Season loop: ordered schedule in, results, totals and standings out.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::accumulator::SeasonAccumulator;
use crate::game::{simulate_game, GameContext};
use crate::league::League;
use crate::model::{GameResult, ScheduledGame};
use crate::standings::Standings;

/// Games to play, unique by id and in date order.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    games: Vec<ScheduledGame>,
}

impl Schedule {
    /// Keep the first row for each game id, then stable-sort by date.
    pub fn new(games: Vec<ScheduledGame>) -> Self {
        let mut seen = HashSet::new();
        let total = games.len();
        let mut games: Vec<ScheduledGame> = games
            .into_iter()
            .filter(|g| seen.insert(g.game_id.clone()))
            .collect();
        if games.len() < total {
            debug!("dropped {} duplicate schedule rows", total - games.len());
        }
        games.sort_by_key(|g| g.date);
        Schedule { games }
    }

    pub fn games(&self) -> &[ScheduledGame] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Everything a finished season produces.
#[derive(Debug, Clone)]
pub struct SeasonOutcome {
    /// In play order.
    pub results: Vec<GameResult>,
    pub accumulator: SeasonAccumulator,
    pub standings: Standings,
}

/// Play every game in order, committing each game's deltas before the next.
pub fn simulate_season<R: Rng + ?Sized>(
    schedule: &Schedule,
    league: &League,
    ctx: &GameContext<'_>,
    rng: &mut R,
) -> SeasonOutcome {
    let mut accumulator = SeasonAccumulator::new();
    let mut standings = Standings::new();
    let mut results = Vec::with_capacity(schedule.len());

    for game in schedule.games() {
        let outcome = simulate_game(game, league, &accumulator, ctx, rng);
        accumulator.commit(&outcome.deltas);
        standings.record(&outcome.result);
        results.push(outcome.result);
    }

    let overtime = results.iter().filter(|r| r.overtime).count();
    info!(
        "simulated {} games ({} decided in overtime), {} teams",
        results.len(),
        overtime,
        standings.len()
    );

    SeasonOutcome {
        results,
        accumulator,
        standings,
    }
}
