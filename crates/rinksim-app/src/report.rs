// Console report: leaderboards and the standings table.

use rinksim_hockey::accumulator::SeasonAccumulator;
use rinksim_hockey::leaders::{top_goalies, top_skaters};
use rinksim_hockey::model::Position;
use rinksim_hockey::standings::Standings;

fn position_label(position: Position) -> &'static str {
    match position {
        Position::Center => "Centers",
        Position::LeftWing => "Left Wings",
        Position::RightWing => "Right Wings",
        Position::Defense => "Defensemen",
    }
}

/// Top `n` skaters at each position, then top `n` goalies.
pub fn leaderboards(acc: &SeasonAccumulator, n: usize) -> String {
    let mut out = String::new();
    for position in Position::ALL {
        out.push_str(&format!("\nTop {} {} by Points:\n", n, position_label(position)));
        for l in top_skaters(acc, position, n) {
            out.push_str(&format!(
                "  {} ({}): {} points ({} GP, {} G, {} A, {} SOG)\n",
                l.name,
                l.team,
                l.points,
                l.totals.games_played,
                l.totals.goals,
                l.totals.assists(),
                l.totals.shots
            ));
        }
    }

    out.push_str(&format!("\nTop {} Goalies by Points:\n", n));
    for l in top_goalies(acc, n) {
        out.push_str(&format!(
            "  {} ({}): {} points ({} games, {} wins, {} shutouts, {} GA, {} saves)\n",
            l.name,
            l.team,
            l.points,
            l.totals.games_played,
            l.totals.wins,
            l.totals.shutouts,
            l.totals.goals_against,
            l.totals.saves()
        ));
    }
    out
}

/// Ranked standings as `TEAM  W-L-OTL | PTS | GF | GA`, where W counts
/// overtime wins too.
pub fn standings_table(standings: &Standings) -> String {
    let mut out = String::from("\nStandings:\n");
    for (rank, e) in standings.ranked().iter().enumerate() {
        let record = format!("{}-{}-{}", e.wins + e.ot_wins, e.losses, e.ot_losses);
        out.push_str(&format!(
            "{:>3}. {:<4} {:<9} | {:>3} pts | {:>3} GF | {:>3} GA\n",
            rank + 1,
            e.team,
            record,
            e.points,
            e.goals_for,
            e.goals_against
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rinksim_hockey::accumulator::{GameDeltas, SkaterDelta, SkaterLine};
    use rinksim_hockey::model::{GameResult, InjuryState, PlayerKey, SideResult};

    fn side(name: &str, goals: u32) -> SideResult {
        SideResult {
            name: name.into(),
            shots: 30,
            goals,
            hits: 0,
            blocks: 0,
            scoring: vec![],
            scorers: vec![],
            assists: vec![],
            goalie: None,
            injured: vec![],
        }
    }

    fn result(home: &str, hs: u32, away: &str, aws: u32, overtime: bool) -> GameResult {
        GameResult {
            game_id: format!("{home}{away}"),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            home: side(home, hs),
            away: side(away, aws),
            home_score: hs,
            away_score: aws,
            overtime,
        }
    }

    #[test]
    fn standings_record_counts_ot_wins_as_wins() {
        let standings = Standings::from_results(&[
            result("FLA", 3, "TBL", 2, true),
            result("TBL", 4, "FLA", 1, false),
            result("FLA", 2, "TBL", 0, false),
        ]);
        let table = standings_table(&standings);
        let lines: Vec<&str> = table.lines().filter(|l| l.contains('|')).collect();
        assert_eq!(lines.len(), 2);
        // FLA: 1 regulation win + 1 OT win, 1 loss -> 2-1-0, 5 points.
        assert!(lines[0].contains("FLA"), "{}", lines[0]);
        assert!(lines[0].contains("2-1-0"), "{}", lines[0]);
        assert!(lines[0].contains("  5 pts"), "{}", lines[0]);
        // TBL: 1 win, 1 loss, 1 OT loss -> 1-1-1, 4 points.
        assert!(lines[1].contains("1-1-1"), "{}", lines[1]);
        assert!(lines[1].contains("  4 pts"), "{}", lines[1]);
    }

    #[test]
    fn leaderboards_list_every_position() {
        let mut acc = SeasonAccumulator::new();
        acc.commit(&GameDeltas {
            skaters: vec![SkaterDelta {
                key: PlayerKey::new("Reinhart", "FLA"),
                position: Position::Center,
                line: Some(SkaterLine {
                    games_played: 1,
                    goals: 2,
                    shots: 5,
                    ..Default::default()
                }),
                injury: InjuryState::Healthy,
            }],
            goalies: vec![],
        });
        let text = leaderboards(&acc, 3);
        for heading in ["Centers", "Left Wings", "Right Wings", "Defensemen", "Goalies"] {
            assert!(text.contains(&format!("Top 3 {heading} by Points:")), "{heading}");
        }
        assert!(text.contains("Reinhart (FLA): 7.25 points"));
    }
}
