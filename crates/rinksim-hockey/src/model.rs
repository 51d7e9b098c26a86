// Players, schedule entries and game results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Skater positions as they appear in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "L")]
    LeftWing,
    #[serde(rename = "R")]
    RightWing,
    #[serde(rename = "D")]
    Defense,
}

impl Position {
    /// Leaderboard order.
    pub const ALL: [Position; 4] = [
        Position::Center,
        Position::LeftWing,
        Position::RightWing,
        Position::Defense,
    ];

    /// Parse a position code. Accepts the single-letter codes plus the
    /// common long forms ("LW", "RW").
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "C" => Some(Position::Center),
            "L" | "LW" => Some(Position::LeftWing),
            "R" | "RW" => Some(Position::RightWing),
            "D" => Some(Position::Defense),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::LeftWing => "L",
            Position::RightWing => "R",
            Position::Defense => "D",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Injury state
// ---------------------------------------------------------------------------

/// Current availability of a player. Only the injured variant carries a
/// games-remaining count, so a healthy player always has zero games left.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InjuryState {
    #[default]
    Healthy,
    Injured {
        injury: String,
        #[serde(rename = "gamesLeft")]
        games_left: u32,
    },
}

impl InjuryState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, InjuryState::Healthy)
    }

    pub fn games_left(&self) -> u32 {
        match self {
            InjuryState::Healthy => 0,
            InjuryState::Injured { games_left, .. } => *games_left,
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Identity of a player within the season: the same name on two teams
/// (a mid-season trade in the source data) is two separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerKey {
    pub name: String,
    pub team: String,
}

impl PlayerKey {
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        PlayerKey {
            name: name.into(),
            team: team.into(),
        }
    }
}

/// Season counting stats for a skater. Stored as floats because the
/// historical tables carry fractional values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkaterStats {
    pub games_played: f64,
    pub shots: f64,
    pub goals: f64,
    pub primary_assists: f64,
    pub secondary_assists: f64,
    pub hits: f64,
    pub blocks: f64,
}

impl SkaterStats {
    /// Games used as the per-game divisor; zero is treated as one.
    pub fn games_divisor(&self) -> f64 {
        if self.games_played > 0.0 {
            self.games_played
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skater {
    pub name: String,
    pub team: String,
    pub position: Position,
    pub stats: SkaterStats,
    /// Per-game injury probability, fixed when the roster is loaded.
    pub injury_risk: f64,
    pub injury: InjuryState,
}

impl Skater {
    pub fn key(&self) -> PlayerKey {
        PlayerKey::new(self.name.clone(), self.team.clone())
    }
}

/// Season totals for a goalie.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalieStats {
    pub games_played: f64,
    pub goals_against: f64,
    pub unblocked_shots: f64,
    pub shutouts: f64,
    pub wins: f64,
}

impl GoalieStats {
    /// Fraction of unblocked shots stopped, if the goalie faced any.
    pub fn save_pct(&self) -> Option<f64> {
        if self.unblocked_shots > 0.0 {
            Some(1.0 - self.goals_against / self.unblocked_shots)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goalie {
    pub name: String,
    pub team: String,
    pub stats: GoalieStats,
    pub injury_risk: f64,
    pub injury: InjuryState,
}

impl Goalie {
    pub fn key(&self) -> PlayerKey {
        PlayerKey::new(self.name.clone(), self.team.clone())
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// One row of the schedule, seen from `team`'s perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub game_id: String,
    pub date: NaiveDate,
    pub team: String,
    pub opponent: String,
    /// `team` plays on the road.
    pub away: bool,
}

impl ScheduledGame {
    pub fn home_team(&self) -> &str {
        if self.away {
            &self.opponent
        } else {
            &self.team
        }
    }

    pub fn away_team(&self) -> &str {
        if self.away {
            &self.team
        } else {
            &self.opponent
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Time of a goal within regulation, rendered as `M:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameClock {
    pub minute: u8,
    pub second: u8,
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minute, self.second)
    }
}

impl Serialize for GameClock {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalEvent {
    pub time: GameClock,
    pub scorer: String,
    /// Zero, one or two assisters; index 0 is the primary assist.
    pub assists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerLine {
    pub name: String,
    pub position: Position,
    pub goals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistLine {
    pub name: String,
    pub primary_assists: u32,
    pub secondary_assists: u32,
}

/// A player who picked up an injury during this game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryReport {
    pub name: String,
    pub position: Position,
    pub injury: String,
    pub games_out: u32,
}

/// One team's side of a simulated game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideResult {
    pub name: String,
    pub shots: u32,
    /// Final goals, including a tie-break goal.
    pub goals: u32,
    pub hits: u32,
    pub blocks: u32,
    /// Regulation goals in chronological order.
    pub scoring: Vec<GoalEvent>,
    pub scorers: Vec<ScorerLine>,
    pub assists: Vec<AssistLine>,
    pub goalie: Option<String>,
    pub injured: Vec<InjuryReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_id: String,
    pub date: NaiveDate,
    pub home: SideResult,
    pub away: SideResult,
    pub home_score: u32,
    pub away_score: u32,
    pub overtime: bool,
}

impl GameResult {
    pub fn winner(&self) -> &str {
        if self.home_score > self.away_score {
            &self.home.name
        } else {
            &self.away.name
        }
    }

    pub fn loser(&self) -> &str {
        if self.home_score > self.away_score {
            &self.away.name
        } else {
            &self.home.name
        }
    }
}
