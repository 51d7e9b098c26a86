// Input loading: schedule and player CSVs, goal-minute and injury JSON.

pub mod players;
pub mod schedule;
pub mod tables;

use std::path::Path;

use rinksim_core::config::Config;
use thiserror::Error;
use tracing::info;

use crate::error::SimError;
use crate::game::GameContext;
use crate::injury::InjuryModel;
use crate::league::League;
use crate::season::Schedule;
use crate::timing::GoalMinuteWeights;

pub use players::{load_goalies, load_skaters};
pub use schedule::load_schedule;
pub use tables::{load_goal_minutes, load_injury_catalog};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("game {game_id} has an unparseable date '{value}'")]
    InvalidDate { game_id: String, value: String },

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("validation error: {0}")]
    Validation(String),
}

pub(crate) fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Everything a season run needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SeasonData {
    pub schedule: Schedule,
    pub league: League,
    pub injuries: InjuryModel,
    pub goal_minutes: GoalMinuteWeights,
}

impl SeasonData {
    pub fn context<'a>(&'a self, config: &'a Config) -> GameContext<'a> {
        GameContext {
            params: &config.simulation,
            injuries: &self.injuries,
            goal_minutes: &self.goal_minutes,
        }
    }
}

/// Load every input named in `config.data_paths`.
pub fn load_all(config: &Config) -> Result<SeasonData, DataError> {
    let paths = &config.data_paths;
    let params = &config.simulation;

    let games = load_schedule(Path::new(&paths.schedule))?;
    let skaters = load_skaters(
        Path::new(&paths.skaters),
        config.roster.min_skater_games,
        params,
    )?;
    let goalies = load_goalies(
        Path::new(&paths.goalies),
        config.roster.min_goalie_games,
        params,
    )?;
    let goal_minutes = load_goal_minutes(Path::new(&paths.goal_minutes))?;
    let injuries = load_injury_catalog(Path::new(&paths.injuries))?;

    if games.is_empty() {
        return Err(DataError::Validation(
            "schedule CSV produced zero valid games".into(),
        ));
    }
    if skaters.is_empty() {
        return Err(DataError::Validation(
            "skater CSV produced zero valid rows".into(),
        ));
    }
    if goalies.is_empty() {
        return Err(DataError::Validation(
            "goalie CSV produced zero valid rows".into(),
        ));
    }

    let schedule = Schedule::new(games);
    let league = League::new(skaters, goalies);
    info!(
        "loaded {} games, {} skaters and {} goalies across {} teams",
        schedule.len(),
        league.skater_count(),
        league.goalie_count(),
        league.teams().len()
    );

    Ok(SeasonData {
        schedule,
        league,
        injuries,
        goal_minutes,
    })
}
