// Configuration loading and parsing (rinksim.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Location of the config file when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config/rinksim.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

/// Every section is optional; a missing section falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub season: SeasonConfig,
    pub roster: RosterConfig,
    pub data_paths: DataPaths,
    pub output: OutputConfig,
    pub simulation: SimParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Seed for the run. When absent a fresh seed is drawn and logged.
    pub seed: Option<u64>,
}

/// Minimum games played (exclusive) for a historical row to make a roster.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub min_skater_games: u32,
    pub min_goalie_games: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            min_skater_games: 20,
            min_goalie_games: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub schedule: String,
    pub skaters: String,
    pub goalies: String,
    pub goal_minutes: String,
    pub injuries: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            schedule: "data/schedule.csv".into(),
            skaters: "data/skaters.csv".into(),
            goalies: "data/goalies.csv".into(),
            goal_minutes: "data/goalsperminute.json".into(),
            injuries: "data/injuries.json".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub leaderboard_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: "results".into(),
            leaderboard_size: 10,
        }
    }
}

/// Tunable constants of the per-game model.
///
/// The defaults reproduce the reference season model: an 82-game season,
/// a league-average .900 save percentage and a 30/70 blend of goalie quality
/// and shooter finishing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Games in a full season; scales goalie workload and injury risk.
    pub season_games: f64,
    /// Save percentage assumed when the opposing goalie is unknown.
    pub default_save_pct: f64,
    pub save_pct_weight: f64,
    pub shooting_weight: f64,
    pub base_goal_chance: f64,
    /// Subtracted from the per-game shot average before rounding.
    pub shot_bias: f64,
    /// Half-width of the uniform noise added to the shot average.
    pub shot_spread: f64,
    /// Relative half-width of the noise applied to hits and blocks.
    pub physical_spread: f64,
    pub injury_risk_divisor: f64,
    pub min_injury_risk: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            season_games: 82.0,
            default_save_pct: 0.9,
            save_pct_weight: 0.3,
            shooting_weight: 0.7,
            base_goal_chance: 0.02,
            shot_bias: 0.25,
            shot_spread: 1.0,
            physical_spread: 0.2,
            injury_risk_divisor: 9.0,
            min_injury_risk: 0.01,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate config text. `path` is only used for error reporting.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate configuration from an explicit file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    parse_config(&text, path)
}

/// Load configuration for a run.
///
/// An explicit path must exist. Without one, `config/rinksim.toml` relative
/// to the working directory is used when present, otherwise the built-in
/// defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config_from(default_path);
    }

    info!(
        "no config file at {}, using built-in defaults",
        default_path.display()
    );
    let config = Config::default();
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.output.leaderboard_size == 0 {
        return Err(invalid("output.leaderboard_size", "must be > 0".into()));
    }

    let sim = &config.simulation;

    let finite_fields: &[(&str, f64)] = &[
        ("simulation.season_games", sim.season_games),
        ("simulation.default_save_pct", sim.default_save_pct),
        ("simulation.save_pct_weight", sim.save_pct_weight),
        ("simulation.shooting_weight", sim.shooting_weight),
        ("simulation.base_goal_chance", sim.base_goal_chance),
        ("simulation.shot_bias", sim.shot_bias),
        ("simulation.shot_spread", sim.shot_spread),
        ("simulation.physical_spread", sim.physical_spread),
        ("simulation.injury_risk_divisor", sim.injury_risk_divisor),
        ("simulation.min_injury_risk", sim.min_injury_risk),
    ];
    for (name, val) in finite_fields {
        if !val.is_finite() {
            return Err(invalid(name, format!("must be finite, got {val}")));
        }
    }

    if sim.season_games <= 0.0 {
        return Err(invalid(
            "simulation.season_games",
            format!("must be > 0, got {}", sim.season_games),
        ));
    }
    if sim.injury_risk_divisor <= 0.0 {
        return Err(invalid(
            "simulation.injury_risk_divisor",
            format!("must be > 0, got {}", sim.injury_risk_divisor),
        ));
    }

    let unit_fields: &[(&str, f64)] = &[
        ("simulation.default_save_pct", sim.default_save_pct),
        ("simulation.physical_spread", sim.physical_spread),
        ("simulation.min_injury_risk", sim.min_injury_risk),
    ];
    for (name, val) in unit_fields {
        if !(0.0..=1.0).contains(val) {
            return Err(invalid(
                name,
                format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            ));
        }
    }

    let non_negative: &[(&str, f64)] = &[
        ("simulation.save_pct_weight", sim.save_pct_weight),
        ("simulation.shooting_weight", sim.shooting_weight),
        ("simulation.base_goal_chance", sim.base_goal_chance),
        ("simulation.shot_spread", sim.shot_spread),
    ];
    for (name, val) in non_negative {
        if *val < 0.0 {
            return Err(invalid(name, format!("must be >= 0, got {val}")));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
