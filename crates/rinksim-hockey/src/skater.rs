// One skater's stat line for one game.

use rand::Rng;
use rinksim_core::config::SimParams;

use crate::assists::pick_assists;
use crate::game::GameContext;
use crate::injury::InjuryModel;
use crate::model::{GoalEvent, InjuryState, Position, Skater, SkaterStats};

/// What a skater did in a single game.
#[derive(Debug, Clone, PartialEq)]
pub struct SkaterGame {
    pub name: String,
    pub position: Position,
    /// Healthy at puck drop. Undressed skaters have an all-zero line.
    pub dressed: bool,
    pub shots: u32,
    /// Goals in the order they were generated.
    pub goals: Vec<GoalEvent>,
    pub hits: u32,
    pub blocks: u32,
    /// Injury state after this game.
    pub injury: InjuryState,
    pub newly_injured: bool,
}

/// Uniform noise in `[-spread, spread)`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    (rng.gen::<f64>() * 2.0 - 1.0) * spread
}

/// Round to the nearest whole count, flooring at zero.
fn round_count(x: f64) -> u32 {
    let r = x.round();
    if r > 0.0 {
        r as u32
    } else {
        0
    }
}

/// Probability that a single shot goes in.
///
/// Blends the opposing goalie (`1 - save%`) with the shooter's historical
/// finishing (goals per shot), plus a small floor.
pub fn goal_chance(stats: &SkaterStats, opponent_save_pct: f64, params: &SimParams) -> f64 {
    let gp = stats.games_divisor();
    let avg_shots = stats.shots / gp;
    let avg_goals = stats.goals / gp;
    let goal_per_shot = if avg_shots > 0.0 {
        avg_goals / avg_shots
    } else {
        0.0
    };
    params.save_pct_weight * (1.0 - opponent_save_pct)
        + params.shooting_weight * goal_per_shot
        + params.base_goal_chance
}

/// Simulate one skater's game.
///
/// `roster` is the full team snapshot, used for assist attribution. Injured
/// skaters sit out and only count down their injury; healthy skaters
/// generate hits, blocks, shots and goals, then roll for a new injury.
pub fn play_skater<R: Rng + ?Sized>(
    skater: &Skater,
    roster: &[Skater],
    opponent_save_pct: f64,
    ctx: &GameContext<'_>,
    rng: &mut R,
) -> SkaterGame {
    if !skater.injury.is_healthy() {
        return SkaterGame {
            name: skater.name.clone(),
            position: skater.position,
            dressed: false,
            shots: 0,
            goals: Vec::new(),
            hits: 0,
            blocks: 0,
            injury: InjuryModel::recover(&skater.injury),
            newly_injured: false,
        };
    }

    let params = ctx.params;
    let stats = &skater.stats;
    let gp = stats.games_divisor();

    let hits = round_count(stats.hits / gp * (1.0 + jitter(rng, params.physical_spread)));
    let blocks = round_count(stats.blocks / gp * (1.0 + jitter(rng, params.physical_spread)));
    let shots = round_count(stats.shots / gp + jitter(rng, params.shot_spread) - params.shot_bias);

    let chance = goal_chance(stats, opponent_save_pct, params);
    let mut goals = Vec::new();
    for _ in 0..shots {
        if rng.gen::<f64>() < chance {
            let time = ctx.goal_minutes.draw_clock(rng);
            let assists = pick_assists(skater, roster, rng);
            goals.push(GoalEvent {
                time,
                scorer: skater.name.clone(),
                assists,
            });
        }
    }

    let step = ctx.injuries.step(&skater.injury, skater.injury_risk, rng);

    SkaterGame {
        name: skater.name.clone(),
        position: skater.position,
        dressed: true,
        shots,
        goals,
        hits,
        blocks,
        injury: step.next,
        newly_injured: step.newly_injured,
    }
}
