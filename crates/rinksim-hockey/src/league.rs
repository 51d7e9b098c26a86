// Base rosters grouped by team.

use std::collections::BTreeMap;

use crate::model::{Goalie, Skater};

/// Loaded skaters and goalies, grouped by team in load order.
#[derive(Debug, Clone, Default)]
pub struct League {
    skaters: BTreeMap<String, Vec<Skater>>,
    goalies: BTreeMap<String, Vec<Goalie>>,
}

impl League {
    pub fn new(skaters: Vec<Skater>, goalies: Vec<Goalie>) -> Self {
        let mut league = League::default();
        for s in skaters {
            league.skaters.entry(s.team.clone()).or_default().push(s);
        }
        for g in goalies {
            league.goalies.entry(g.team.clone()).or_default().push(g);
        }
        league
    }

    /// A team's base skater roster; empty for an unknown team.
    pub fn skaters(&self, team: &str) -> &[Skater] {
        self.skaters.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn goalies(&self, team: &str) -> &[Goalie] {
        self.goalies.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_skaters(&self) -> impl Iterator<Item = &Skater> {
        self.skaters.values().flatten()
    }

    pub fn all_goalies(&self) -> impl Iterator<Item = &Goalie> {
        self.goalies.values().flatten()
    }

    /// Teams with at least one skater or goalie.
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = self
            .skaters
            .keys()
            .chain(self.goalies.keys())
            .map(String::as_str)
            .collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }

    pub fn skater_count(&self) -> usize {
        self.skaters.values().map(Vec::len).sum()
    }

    pub fn goalie_count(&self) -> usize {
        self.goalies.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GoalieStats, InjuryState, Position, SkaterStats};

    fn skater(name: &str, team: &str) -> Skater {
        Skater {
            name: name.into(),
            team: team.into(),
            position: Position::Center,
            stats: SkaterStats::default(),
            injury_risk: 0.01,
            injury: InjuryState::Healthy,
        }
    }

    #[test]
    fn groups_by_team_in_load_order() {
        let league = League::new(
            vec![skater("B", "TOR"), skater("X", "MTL"), skater("A", "TOR")],
            vec![Goalie {
                name: "G".into(),
                team: "OTT".into(),
                stats: GoalieStats::default(),
                injury_risk: 0.01,
                injury: InjuryState::Healthy,
            }],
        );
        let tor: Vec<&str> = league.skaters("TOR").iter().map(|s| s.name.as_str()).collect();
        assert_eq!(tor, vec!["B", "A"]);
        assert!(league.skaters("OTT").is_empty());
        assert_eq!(league.goalies("OTT").len(), 1);
        assert!(league.goalies("XXX").is_empty());
        assert_eq!(league.teams(), vec!["MTL", "OTT", "TOR"]);
        assert_eq!(league.skater_count(), 3);
        assert_eq!(league.goalie_count(), 1);
    }
}
