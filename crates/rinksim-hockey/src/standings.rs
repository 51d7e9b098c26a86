// League table built from game results.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::GameResult;

/// Points for a regulation win; a regulation loss earns nothing.
pub const REGULATION_WIN_POINTS: u32 = 3;
pub const OVERTIME_WIN_POINTS: u32 = 2;
pub const OVERTIME_LOSS_POINTS: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub team: String,
    /// Regulation wins.
    pub wins: u32,
    /// Regulation losses.
    pub losses: u32,
    pub ot_wins: u32,
    pub ot_losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl StandingsEntry {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ot_wins + self.ot_losses
    }

    pub fn goal_differential(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

/// Team records in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Standings {
    entries: Vec<StandingsEntry>,
    index: HashMap<String, usize>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a GameResult>,
    {
        let mut standings = Standings::new();
        for result in results {
            standings.record(result);
        }
        standings
    }

    /// Credit one final score: 3-0 in regulation, 2-1 after a tie-break.
    pub fn record(&mut self, result: &GameResult) {
        let home_won = result.home_score > result.away_score;
        let (winner_score, loser_score) = if home_won {
            (result.home_score, result.away_score)
        } else {
            (result.away_score, result.home_score)
        };
        let overtime = result.overtime;

        // Home registers before away.
        self.entry_mut(&result.home.name);
        self.entry_mut(&result.away.name);

        let winner = self.entry_mut(result.winner());
        winner.goals_for += winner_score;
        winner.goals_against += loser_score;
        if overtime {
            winner.ot_wins += 1;
            winner.points += OVERTIME_WIN_POINTS;
        } else {
            winner.wins += 1;
            winner.points += REGULATION_WIN_POINTS;
        }

        let loser = self.entry_mut(result.loser());
        loser.goals_for += loser_score;
        loser.goals_against += winner_score;
        if overtime {
            loser.ot_losses += 1;
            loser.points += OVERTIME_LOSS_POINTS;
        } else {
            loser.losses += 1;
        }
    }

    fn entry_mut(&mut self, team: &str) -> &mut StandingsEntry {
        let idx = match self.index.get(team) {
            Some(&i) => i,
            None => {
                self.entries.push(StandingsEntry {
                    team: team.to_string(),
                    ..Default::default()
                });
                self.index.insert(team.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    pub fn get(&self, team: &str) -> Option<&StandingsEntry> {
        self.index.get(team).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[StandingsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Points descending; teams level on points keep first-appearance order.
    pub fn ranked(&self) -> Vec<&StandingsEntry> {
        let mut ranked: Vec<&StandingsEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SideResult;
    use chrono::NaiveDate;

    fn side(name: &str, goals: u32) -> SideResult {
        SideResult {
            name: name.into(),
            shots: 30,
            goals,
            hits: 20,
            blocks: 12,
            scoring: vec![],
            scorers: vec![],
            assists: vec![],
            goalie: None,
            injured: vec![],
        }
    }

    fn result(home: &str, hs: u32, away: &str, aws: u32, overtime: bool) -> GameResult {
        GameResult {
            game_id: format!("{home}-{away}"),
            date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            home: side(home, hs),
            away: side(away, aws),
            home_score: hs,
            away_score: aws,
            overtime,
        }
    }

    #[test]
    fn regulation_win_is_three_nothing() {
        let standings = Standings::from_results(&[result("VAN", 4, "CGY", 1, false)]);
        let van = standings.get("VAN").unwrap();
        assert_eq!((van.wins, van.points, van.goals_for, van.goals_against), (1, 3, 4, 1));
        let cgy = standings.get("CGY").unwrap();
        assert_eq!((cgy.losses, cgy.points, cgy.goals_for, cgy.goals_against), (1, 0, 1, 4));
    }

    #[test]
    fn overtime_win_is_two_one() {
        let standings = Standings::from_results(&[result("VAN", 2, "CGY", 3, true)]);
        let cgy = standings.get("CGY").unwrap();
        assert_eq!((cgy.ot_wins, cgy.wins, cgy.points), (1, 0, 2));
        let van = standings.get("VAN").unwrap();
        assert_eq!((van.ot_losses, van.losses, van.points), (1, 0, 1));
    }

    #[test]
    fn points_per_game_always_three() {
        let results = vec![
            result("VAN", 4, "CGY", 1, false),
            result("EDM", 3, "VAN", 2, true),
            result("CGY", 1, "EDM", 5, false),
            result("SEA", 2, "VAN", 3, true),
        ];
        let standings = Standings::from_results(&results);
        let total: u32 = standings.entries().iter().map(|e| e.points).sum();
        assert_eq!(total, 3 * results.len() as u32);
        let games: u32 = standings.entries().iter().map(|e| e.games_played()).sum();
        assert_eq!(games, 2 * results.len() as u32);
    }

    #[test]
    fn ranked_by_points_with_stable_ties() {
        let results = vec![
            result("VAN", 4, "CGY", 1, false), // VAN 3
            result("EDM", 2, "SEA", 1, false), // EDM 3
            result("SEA", 3, "CGY", 2, true),  // SEA 2, CGY 1
        ];
        let standings = Standings::from_results(&results);
        let order: Vec<&str> = standings.ranked().iter().map(|e| e.team.as_str()).collect();
        assert_eq!(order, vec!["VAN", "EDM", "SEA", "CGY"]);
    }

    #[test]
    fn home_team_registers_first() {
        // Away wins the opener, then both teams end level on points.
        let results = vec![
            result("CGY", 1, "VAN", 4, false), // VAN 3
            result("VAN", 2, "CGY", 5, false), // CGY 3
        ];
        let standings = Standings::from_results(&results);
        let entries: Vec<&str> = standings.entries().iter().map(|e| e.team.as_str()).collect();
        assert_eq!(entries, vec!["CGY", "VAN"]);
        let order: Vec<&str> = standings.ranked().iter().map(|e| e.team.as_str()).collect();
        assert_eq!(order, vec!["CGY", "VAN"]);
    }

    #[test]
    fn goal_differential_signed() {
        let standings = Standings::from_results(&[result("VAN", 1, "CGY", 6, false)]);
        assert_eq!(standings.get("VAN").unwrap().goal_differential(), -5);
        assert_eq!(standings.len(), 2);
    }
}
