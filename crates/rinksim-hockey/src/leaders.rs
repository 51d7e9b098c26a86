// Fantasy-point leaderboards over the simulated season.

use serde::Serialize;

use crate::accumulator::{GoalieEntry, GoalieLine, SeasonAccumulator, SkaterEntry, SkaterLine};
use crate::model::Position;

/// `G*3 + A*2 + SOG*0.25 + HIT*0.5 + BLK*0.5`.
pub fn skater_points(line: &SkaterLine) -> f64 {
    line.goals as f64 * 3.0
        + line.assists() as f64 * 2.0
        + line.shots as f64 * 0.25
        + line.hits as f64 * 0.5
        + line.blocks as f64 * 0.5
}

/// `round(W*2.5 + SO*2.5 + SV*0.3 - GA)`.
pub fn goalie_points(line: &GoalieLine) -> f64 {
    (line.wins as f64 * 2.5 + line.shutouts as f64 * 2.5 + line.saves() as f64 * 0.3
        - line.goals_against as f64)
        .round()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkaterLeader<'a> {
    pub name: &'a str,
    pub team: &'a str,
    pub position: Position,
    pub totals: SkaterLine,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalieLeader<'a> {
    pub name: &'a str,
    pub team: &'a str,
    pub totals: GoalieLine,
    pub points: f64,
}

fn skater_leader(entry: &SkaterEntry) -> SkaterLeader<'_> {
    SkaterLeader {
        name: &entry.name,
        team: &entry.team,
        position: entry.position,
        totals: entry.totals,
        points: skater_points(&entry.totals),
    }
}

fn goalie_leader(entry: &GoalieEntry) -> GoalieLeader<'_> {
    GoalieLeader {
        name: &entry.name,
        team: &entry.team,
        totals: entry.totals,
        points: goalie_points(&entry.totals),
    }
}

/// Top `n` skaters at `position`, points descending. Ties keep
/// accumulator order.
pub fn top_skaters(acc: &SeasonAccumulator, position: Position, n: usize) -> Vec<SkaterLeader<'_>> {
    let mut leaders: Vec<SkaterLeader<'_>> = acc
        .skaters()
        .iter()
        .filter(|e| e.position == position)
        .map(skater_leader)
        .collect();
    leaders.sort_by(|a, b| b.points.total_cmp(&a.points));
    leaders.truncate(n);
    leaders
}

pub fn top_goalies(acc: &SeasonAccumulator, n: usize) -> Vec<GoalieLeader<'_>> {
    let mut leaders: Vec<GoalieLeader<'_>> = acc.goalies().iter().map(goalie_leader).collect();
    leaders.sort_by(|a, b| b.points.total_cmp(&a.points));
    leaders.truncate(n);
    leaders
}
