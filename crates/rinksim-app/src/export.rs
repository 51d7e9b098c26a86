// JSON result files written after a season run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rinksim_hockey::accumulator::{GoalieEntry, SeasonAccumulator, SkaterEntry};
use rinksim_hockey::leaders::{goalie_points, skater_points};
use rinksim_hockey::model::{GameResult, InjuryState, Position, SideResult};
use rinksim_hockey::season::SeasonOutcome;
use serde::Serialize;
use tracing::info;

pub const SEASON_FILE: &str = "season.json";
pub const SKATERS_FILE: &str = "skaters.json";
pub const GOALIES_FILE: &str = "goalies.json";
pub const STANDINGS_FILE: &str = "standings.json";

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameSummary<'a> {
    game_id: &'a str,
    home: &'a SideResult,
    away: &'a SideResult,
    home_score: u32,
    away_score: u32,
    overtime: bool,
}

#[derive(Debug, Default, Serialize)]
struct DateGames<'a> {
    games: Vec<GameSummary<'a>>,
}

/// Skater totals under the same column names as the input CSV.
#[derive(Debug, Serialize)]
struct SkaterRow<'a> {
    name: &'a str,
    team: &'a str,
    position: Position,
    games_played: u32,
    #[serde(rename = "I_F_shotsOnGoal")]
    shots: u32,
    #[serde(rename = "I_F_goals")]
    goals: u32,
    #[serde(rename = "I_F_primaryAssists")]
    primary_assists: u32,
    #[serde(rename = "I_F_secondaryAssists")]
    secondary_assists: u32,
    #[serde(rename = "I_F_hits")]
    hits: u32,
    #[serde(rename = "shotsBlockedByPlayer")]
    blocks: u32,
    injury: &'a InjuryState,
    points: f64,
}

#[derive(Debug, Serialize)]
struct GoalieRow<'a> {
    name: &'a str,
    team: &'a str,
    games_played: u32,
    goals: u32,
    unblocked_shot_attempts: u32,
    shutouts: u32,
    wins: u32,
    points: f64,
}

impl<'a> From<&'a SkaterEntry> for SkaterRow<'a> {
    fn from(e: &'a SkaterEntry) -> Self {
        SkaterRow {
            name: &e.name,
            team: &e.team,
            position: e.position,
            games_played: e.totals.games_played,
            shots: e.totals.shots,
            goals: e.totals.goals,
            primary_assists: e.totals.primary_assists,
            secondary_assists: e.totals.secondary_assists,
            hits: e.totals.hits,
            blocks: e.totals.blocks,
            injury: &e.injury,
            points: skater_points(&e.totals),
        }
    }
}

impl<'a> From<&'a GoalieEntry> for GoalieRow<'a> {
    fn from(e: &'a GoalieEntry) -> Self {
        GoalieRow {
            name: &e.name,
            team: &e.team,
            games_played: e.totals.games_played,
            goals: e.totals.goals_against,
            unblocked_shot_attempts: e.totals.shots_against,
            shutouts: e.totals.shutouts,
            wins: e.totals.wins,
            points: goalie_points(&e.totals),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn season_by_date(results: &[GameResult]) -> BTreeMap<String, DateGames<'_>> {
    let mut by_date: BTreeMap<String, DateGames<'_>> = BTreeMap::new();
    for r in results {
        by_date
            .entry(r.date.format("%Y-%m-%d").to_string())
            .or_default()
            .games
            .push(GameSummary {
                game_id: &r.game_id,
                home: &r.home,
                away: &r.away,
                home_score: r.home_score,
                away_score: r.away_score,
                overtime: r.overtime,
            });
    }
    by_date
}

/// Skater rows, fantasy points descending.
fn skater_rows(acc: &SeasonAccumulator) -> Vec<SkaterRow<'_>> {
    let mut rows: Vec<SkaterRow<'_>> = acc.skaters().iter().map(SkaterRow::from).collect();
    rows.sort_by(|a, b| b.points.total_cmp(&a.points));
    rows
}

fn goalie_rows(acc: &SeasonAccumulator) -> Vec<GoalieRow<'_>> {
    let mut rows: Vec<GoalieRow<'_>> = acc.goalies().iter().map(GoalieRow::from).collect();
    rows.sort_by(|a, b| b.points.total_cmp(&a.points));
    rows
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Write all four result files into `dir`, creating it if needed.
/// Returns the paths written.
pub fn write_all(dir: &Path, outcome: &SeasonOutcome) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let season = dir.join(SEASON_FILE);
    write_json(&season, &season_by_date(&outcome.results))?;

    let skaters = dir.join(SKATERS_FILE);
    write_json(&skaters, &skater_rows(&outcome.accumulator))?;

    let goalies = dir.join(GOALIES_FILE);
    write_json(&goalies, &goalie_rows(&outcome.accumulator))?;

    let standings = dir.join(STANDINGS_FILE);
    write_json(&standings, &outcome.standings.ranked())?;

    info!("Results written to {}", dir.display());
    Ok(vec![season, skaters, goalies, standings])
}
