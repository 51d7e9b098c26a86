// Skater and goalie CSV loading (MoneyPuck season summaries).
//
// Each player appears once per game-state split; only the "all" rows are
// kept. Numeric columns are parsed leniently: blank or garbage means 0.

use std::io::Read;
use std::path::Path;

use rinksim_core::config::SimParams;
use serde::Deserialize;
use tracing::warn;

use super::{open, DataError};
use crate::injury::injury_risk;
use crate::model::{Goalie, GoalieStats, InjuryState, Position, Skater, SkaterStats};

// ---------------------------------------------------------------------------
// Raw CSV rows
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSkater {
    #[serde(default)]
    name: String,
    #[serde(default)]
    team: String,
    #[serde(default)]
    position: String,
    #[serde(default, alias = "Situation")]
    situation: String,
    #[serde(default)]
    games_played: Option<String>,
    #[serde(default, rename = "I_F_shotsOnGoal")]
    shots: Option<String>,
    #[serde(default, rename = "I_F_goals")]
    goals: Option<String>,
    #[serde(default, rename = "I_F_primaryAssists")]
    primary_assists: Option<String>,
    #[serde(default, rename = "I_F_secondaryAssists")]
    secondary_assists: Option<String>,
    #[serde(default, rename = "I_F_hits")]
    hits: Option<String>,
    #[serde(default, rename = "shotsBlockedByPlayer")]
    blocks: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGoalie {
    #[serde(default)]
    name: String,
    #[serde(default)]
    team: String,
    #[serde(default, alias = "Situation")]
    situation: String,
    #[serde(default)]
    games_played: Option<String>,
    #[serde(default)]
    goals: Option<String>,
    #[serde(default)]
    unblocked_shot_attempts: Option<String>,
    #[serde(default)]
    shutouts: Option<String>,
    #[serde(default)]
    wins: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a numeric cell; blank, unparseable or non-finite values are 0.
fn number(cell: &Option<String>) -> f64 {
    cell.as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn is_all_situations(situation: &str) -> bool {
    situation.trim().eq_ignore_ascii_case("all")
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

pub(crate) fn load_skaters_from_reader<R: Read>(
    rdr: R,
    min_games: u32,
    params: &SimParams,
) -> Result<Vec<Skater>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut skaters = Vec::new();
    for result in reader.deserialize::<RawSkater>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed skater row: {}", e);
                continue;
            }
        };
        if !is_all_situations(&raw.situation) {
            continue;
        }
        let games_played = number(&raw.games_played);
        if games_played <= f64::from(min_games) {
            continue;
        }
        let Some(position) = Position::from_code(&raw.position) else {
            warn!(
                "skipping skater '{}': unknown position '{}'",
                raw.name.trim(),
                raw.position
            );
            continue;
        };

        skaters.push(Skater {
            name: raw.name.trim().to_string(),
            team: raw.team.trim().to_string(),
            position,
            stats: SkaterStats {
                games_played,
                shots: number(&raw.shots),
                goals: number(&raw.goals),
                primary_assists: number(&raw.primary_assists),
                secondary_assists: number(&raw.secondary_assists),
                hits: number(&raw.hits),
                blocks: number(&raw.blocks),
            },
            injury_risk: injury_risk(games_played, params),
            injury: InjuryState::Healthy,
        });
    }
    Ok(skaters)
}

pub(crate) fn load_goalies_from_reader<R: Read>(
    rdr: R,
    min_games: u32,
    params: &SimParams,
) -> Result<Vec<Goalie>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut goalies = Vec::new();
    for result in reader.deserialize::<RawGoalie>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed goalie row: {}", e);
                continue;
            }
        };
        if !is_all_situations(&raw.situation) {
            continue;
        }
        let games_played = number(&raw.games_played);
        if games_played <= f64::from(min_games) {
            continue;
        }

        goalies.push(Goalie {
            name: raw.name.trim().to_string(),
            team: raw.team.trim().to_string(),
            stats: GoalieStats {
                games_played,
                goals_against: number(&raw.goals),
                unblocked_shots: number(&raw.unblocked_shot_attempts),
                shutouts: number(&raw.shutouts),
                wins: number(&raw.wins),
            },
            injury_risk: injury_risk(games_played, params),
            injury: InjuryState::Healthy,
        });
    }
    Ok(goalies)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load skaters with more than `min_games` games played.
pub fn load_skaters(path: &Path, min_games: u32, params: &SimParams) -> Result<Vec<Skater>, DataError> {
    let file = open(path)?;
    load_skaters_from_reader(file, min_games, params).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load goalies with more than `min_games` games played.
pub fn load_goalies(path: &Path, min_games: u32, params: &SimParams) -> Result<Vec<Goalie>, DataError> {
    let file = open(path)?;
    load_goalies_from_reader(file, min_games, params).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKATERS: &str = "\
playerId,season,name,team,position,situation,games_played,icetime,I_F_shotsOnGoal,I_F_goals,I_F_primaryAssists,I_F_secondaryAssists,I_F_hits,shotsBlockedByPlayer
8478402,2023,Connor McDavid,EDM,C,all,76,100000,264,32,60,40,30,25
8478402,2023,Connor McDavid,EDM,C,5on5,76,80000,180,20,40,25,28,22
8477934,2023,Leon Draisaitl,EDM,C,all,81,100000,230,41,45,20,55,30
8480803,2023,Evan Bouchard,EDM,D,All,81,100000,220,18,40,42,50,80
8481000,2023,Call Up,EDM,L,all,12,5000,10,1,1,0,5,2
8481001,2023,Mystery Man,EDM,G,all,60,5000,10,1,1,0,5,2";

    #[test]
    fn keeps_all_situation_rows_above_minimum() {
        let params = SimParams::default();
        let skaters = load_skaters_from_reader(SKATERS.as_bytes(), 20, &params).unwrap();
        let names: Vec<&str> = skaters.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Connor McDavid", "Leon Draisaitl", "Evan Bouchard"]);

        let mcdavid = &skaters[0];
        assert_eq!(mcdavid.team, "EDM");
        assert_eq!(mcdavid.position, Position::Center);
        assert!((mcdavid.stats.games_played - 76.0).abs() < f64::EPSILON);
        assert!((mcdavid.stats.shots - 264.0).abs() < f64::EPSILON);
        assert!((mcdavid.stats.goals - 32.0).abs() < f64::EPSILON);
        assert!((mcdavid.stats.primary_assists - 60.0).abs() < f64::EPSILON);
        assert!((mcdavid.stats.secondary_assists - 40.0).abs() < f64::EPSILON);
        assert!((mcdavid.stats.hits - 30.0).abs() < f64::EPSILON);
        assert!((mcdavid.stats.blocks - 25.0).abs() < f64::EPSILON);
        assert!(mcdavid.injury.is_healthy());
        assert_eq!(skaters[2].position, Position::Defense);
    }

    #[test]
    fn minimum_is_exclusive() {
        let params = SimParams::default();
        let skaters = load_skaters_from_reader(SKATERS.as_bytes(), 76, &params).unwrap();
        let names: Vec<&str> = skaters.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Leon Draisaitl", "Evan Bouchard"]);
    }

    #[test]
    fn injury_risk_set_at_load() {
        let params = SimParams::default();
        let skaters = load_skaters_from_reader(SKATERS.as_bytes(), 10, &params).unwrap();
        assert_eq!(skaters[3].name, "Call Up");
        // (82 - 12) / 9 / 82
        let expected = 70.0 / 9.0 / 82.0;
        assert!((skaters[3].injury_risk - expected).abs() < 1e-12);
        // 76 and 81 games both fall below the floor.
        assert!((skaters[0].injury_risk - 0.01).abs() < f64::EPSILON);
        assert!((skaters[1].injury_risk - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_and_garbage_numbers_are_zero() {
        let csv_data = "\
name,team,position,situation,games_played,I_F_shotsOnGoal,I_F_goals,I_F_primaryAssists,I_F_secondaryAssists,I_F_hits
Depth Guy,SJS,R,all,40,,n/a,3,2,NaN";
        let skaters =
            load_skaters_from_reader(csv_data.as_bytes(), 20, &SimParams::default()).unwrap();
        assert_eq!(skaters.len(), 1);
        let stats = skaters[0].stats;
        assert_eq!(stats.shots, 0.0);
        assert_eq!(stats.goals, 0.0);
        assert_eq!(stats.primary_assists, 3.0);
        assert_eq!(stats.hits, 0.0);
        // Column missing entirely.
        assert_eq!(stats.blocks, 0.0);
    }

    #[test]
    fn goalies_filtered_and_parsed() {
        let csv_data = "\
playerId,season,name,team,position,situation,games_played,goals,unblocked_shot_attempts,shutouts,wins
8476945,2023,Connor Hellebuyck,WPG,G,all,60,180,2000,5,37
8476945,2023,Connor Hellebuyck,WPG,G,5on5,60,120,1500,5,37
8480045,2023,Backup Guy,WPG,G,all,5,15,150,0,2";
        let goalies =
            load_goalies_from_reader(csv_data.as_bytes(), 5, &SimParams::default()).unwrap();
        assert_eq!(goalies.len(), 1);
        let g = &goalies[0];
        assert_eq!(g.name, "Connor Hellebuyck");
        assert!((g.stats.goals_against - 180.0).abs() < f64::EPSILON);
        assert!((g.stats.unblocked_shots - 2000.0).abs() < f64::EPSILON);
        assert!((g.stats.shutouts - 5.0).abs() < f64::EPSILON);
        assert!((g.stats.wins - 37.0).abs() < f64::EPSILON);
        assert!((g.stats.save_pct().unwrap() - 0.91).abs() < 1e-12);
    }

    #[test]
    fn goalie_missing_optional_columns() {
        let csv_data = "\
name,team,situation,games_played,goals,unblocked_shot_attempts
Stolarz,TOR,all,30,60,900";
        let goalies =
            load_goalies_from_reader(csv_data.as_bytes(), 5, &SimParams::default()).unwrap();
        assert_eq!(goalies[0].stats.shutouts, 0.0);
        assert_eq!(goalies[0].stats.wins, 0.0);
    }
}
