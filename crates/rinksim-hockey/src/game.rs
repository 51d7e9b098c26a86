// Simulates one scheduled game between two teams.

use rand::Rng;
use rinksim_core::config::SimParams;
use tracing::debug;

use crate::accumulator::{GameDeltas, GoalieDelta, GoalieLine, SeasonAccumulator};
use crate::goalie::{save_pct_against, select_starter};
use crate::injury::InjuryModel;
use crate::league::League;
use crate::model::{GameResult, Goalie, ScheduledGame, SideResult, Skater};
use crate::team::{estimate_team, TeamGame};
use crate::timing::GoalMinuteWeights;

/// Read-only tables every game draws from.
#[derive(Debug, Clone, Copy)]
pub struct GameContext<'a> {
    pub params: &'a SimParams,
    pub injuries: &'a InjuryModel,
    pub goal_minutes: &'a GoalMinuteWeights,
}

/// A game's result plus the season state it changes. Nothing is applied
/// until the caller commits `deltas`.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub result: GameResult,
    pub deltas: GameDeltas,
}

/// Simulate `game` against the season so far.
///
/// Both rosters are merged with `acc` before anything is drawn. Draw order
/// is home starter, away starter, home skaters, away skaters, then the
/// overtime coin flip when it is needed. A regulation tie is settled by
/// the higher season goals-per-skater-game (this game included); an exact
/// tie falls back to a coin flip.
pub fn simulate_game<R: Rng + ?Sized>(
    game: &ScheduledGame,
    league: &League,
    acc: &SeasonAccumulator,
    ctx: &GameContext<'_>,
    rng: &mut R,
) -> GameOutcome {
    let home = game.home_team();
    let away = game.away_team();

    let home_skaters = skater_snapshot(league, acc, home);
    let away_skaters = skater_snapshot(league, acc, away);
    let home_goalies = goalie_snapshot(league, acc, home);
    let away_goalies = goalie_snapshot(league, acc, away);

    let home_goalie = select_starter(&home_goalies, ctx.params, rng);
    let away_goalie = select_starter(&away_goalies, ctx.params, rng);

    let home_game = estimate_team(
        home,
        &home_skaters,
        save_pct_against(away_goalie, ctx.params),
        ctx,
        rng,
    );
    let away_game = estimate_team(
        away,
        &away_skaters,
        save_pct_against(home_goalie, ctx.params),
        ctx,
        rng,
    );

    let mut skater_deltas = home_game.deltas();
    skater_deltas.extend(away_game.deltas());

    let mut home_score = home_game.goals;
    let mut away_score = away_game.goals;
    let overtime = home_score == away_score;
    if overtime {
        let home_rate = acc.team_goal_rate(home, &skater_deltas);
        let away_rate = acc.team_goal_rate(away, &skater_deltas);
        let home_wins = if home_rate != away_rate {
            home_rate > away_rate
        } else {
            rng.gen_bool(0.5)
        };
        if home_wins {
            home_score += 1;
        } else {
            away_score += 1;
        }
    }

    let mut goalie_deltas = Vec::with_capacity(2);
    if let Some(g) = home_goalie {
        goalie_deltas.push(goalie_delta(g, away_score, away_game.shots, home_score > away_score));
    }
    if let Some(g) = away_goalie {
        goalie_deltas.push(goalie_delta(g, home_score, home_game.shots, away_score > home_score));
    }

    debug!(
        "{} {} {}-{} {}{}",
        game.date,
        away,
        away_score,
        home_score,
        home,
        if overtime { " (OT)" } else { "" }
    );

    let result = GameResult {
        game_id: game.game_id.clone(),
        date: game.date,
        home: side_result(&home_game, home_score, home_goalie),
        away: side_result(&away_game, away_score, away_goalie),
        home_score,
        away_score,
        overtime,
    };

    GameOutcome {
        result,
        deltas: GameDeltas {
            skaters: skater_deltas,
            goalies: goalie_deltas,
        },
    }
}

fn skater_snapshot(league: &League, acc: &SeasonAccumulator, team: &str) -> Vec<Skater> {
    league
        .skaters(team)
        .iter()
        .map(|s| acc.skater_snapshot(s))
        .collect()
}

fn goalie_snapshot(league: &League, acc: &SeasonAccumulator, team: &str) -> Vec<Goalie> {
    league
        .goalies(team)
        .iter()
        .map(|g| acc.goalie_snapshot(g))
        .collect()
}

fn goalie_delta(goalie: &Goalie, goals_against: u32, shots_against: u32, won: bool) -> GoalieDelta {
    GoalieDelta {
        key: goalie.key(),
        line: GoalieLine {
            games_played: 1,
            goals_against,
            shots_against,
            shutouts: u32::from(goals_against == 0),
            wins: u32::from(won),
        },
    }
}

fn side_result(team: &TeamGame, goals: u32, goalie: Option<&Goalie>) -> SideResult {
    SideResult {
        name: team.team.clone(),
        shots: team.shots,
        goals,
        hits: team.hits,
        blocks: team.blocks,
        scoring: team.scoring(),
        scorers: team.scorers(),
        assists: team.assists(),
        goalie: goalie.map(|g| g.name.clone()),
        injured: team.newly_injured(),
    }
}
