// Assist attribution for a scored goal.

use rand::Rng;
use rinksim_core::weighted::choose_index;

use crate::model::{Position, Skater};

/// Teammates who can be credited with an assist on `scorer`'s goal.
///
/// Only dressed skaters other than the scorer qualify, and forwards never
/// pick up assists from same-position linemates in this model; a
/// defenseman's goal can be assisted by anyone, including the other D.
pub fn eligible_assisters<'a>(scorer: &Skater, roster: &'a [Skater]) -> Vec<&'a Skater> {
    roster
        .iter()
        .filter(|s| s.injury.is_healthy())
        .filter(|s| s.name != scorer.name)
        .filter(|s| s.position != scorer.position || scorer.position == Position::Defense)
        .collect()
}

/// Draw up to two assisters for one goal.
///
/// The number of assists is uniform over {0, 1, 2}. The first assister is
/// weighted by primary-assist count, the second by secondary-assist count,
/// and nobody is credited twice on the same goal. When every remaining
/// teammate has zero weight the first of them is credited.
pub fn pick_assists<R: Rng + ?Sized>(scorer: &Skater, roster: &[Skater], rng: &mut R) -> Vec<String> {
    let mut pool = eligible_assisters(scorer, roster);
    if pool.is_empty() {
        return Vec::new();
    }

    let count = rng.gen_range(0..=2usize);
    let mut assists = Vec::with_capacity(count);
    for slot in 0..count {
        let weights: Vec<f64> = pool
            .iter()
            .map(|s| {
                if slot == 0 {
                    s.stats.primary_assists
                } else {
                    s.stats.secondary_assists
                }
            })
            .collect();
        if pool.is_empty() {
            break;
        }
        let idx = choose_index(&weights, rng).unwrap_or(0);
        assists.push(pool.remove(idx).name.clone());
    }
    assists
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InjuryState, SkaterStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn skater(name: &str, position: Position, primary: f64, secondary: f64) -> Skater {
        Skater {
            name: name.into(),
            team: "EDM".into(),
            position,
            stats: SkaterStats {
                games_played: 82.0,
                primary_assists: primary,
                secondary_assists: secondary,
                ..Default::default()
            },
            injury_risk: 0.01,
            injury: InjuryState::Healthy,
        }
    }

    fn roster() -> Vec<Skater> {
        vec![
            skater("McDavid", Position::Center, 60.0, 40.0),
            skater("Draisaitl", Position::Center, 40.0, 30.0),
            skater("Hyman", Position::LeftWing, 15.0, 10.0),
            skater("Kane", Position::RightWing, 12.0, 9.0),
            skater("Bouchard", Position::Defense, 30.0, 25.0),
            skater("Ekholm", Position::Defense, 10.0, 15.0),
        ]
    }

    #[test]
    fn forward_excludes_self_and_same_position() {
        let roster = roster();
        let names: Vec<&str> = eligible_assisters(&roster[0], &roster)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Hyman", "Kane", "Bouchard", "Ekholm"]);
    }

    #[test]
    fn defenseman_allows_same_position() {
        let roster = roster();
        let names: Vec<&str> = eligible_assisters(&roster[4], &roster)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["McDavid", "Draisaitl", "Hyman", "Kane", "Ekholm"]
        );
    }

    #[test]
    fn injured_teammates_excluded() {
        let mut roster = roster();
        roster[2].injury = InjuryState::Injured {
            injury: "Knee".into(),
            games_left: 5,
        };
        let names: Vec<&str> = eligible_assisters(&roster[0], &roster)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert!(!names.contains(&"Hyman"));
    }

    #[test]
    fn no_eligible_teammates_no_assists() {
        let roster = vec![
            skater("Solo", Position::Center, 10.0, 10.0),
            skater("Twin", Position::Center, 10.0, 10.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..50 {
            assert!(pick_assists(&roster[0], &roster, &mut rng).is_empty());
        }
    }

    #[test]
    fn zero_weight_pool_credits_first_teammate() {
        let roster = vec![
            skater("Scorer", Position::Center, 0.0, 0.0),
            skater("Grinder", Position::LeftWing, 0.0, 0.0),
            skater("Checker", Position::RightWing, 0.0, 0.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut two_assist_goals = 0;
        for _ in 0..300 {
            let assists = pick_assists(&roster[0], &roster, &mut rng);
            if let Some(first) = assists.first() {
                assert_eq!(first, "Grinder");
            }
            if assists.len() == 2 {
                assert_eq!(assists[1], "Checker");
                two_assist_goals += 1;
            }
        }
        assert!(two_assist_goals > 0);
    }

    #[test]
    fn single_teammate_gets_at_most_one_assist() {
        let roster = vec![
            skater("Scorer", Position::Center, 0.0, 0.0),
            skater("Linemate", Position::LeftWing, 20.0, 20.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(37);
        for _ in 0..300 {
            assert!(pick_assists(&roster[0], &roster, &mut rng).len() <= 1);
        }
    }

    #[test]
    fn assists_are_distinct_and_never_the_scorer() {
        let roster = roster();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..2_000 {
            let assists = pick_assists(&roster[4], &roster, &mut rng);
            assert!(assists.len() <= 2);
            assert!(!assists.contains(&"Bouchard".to_string()));
            if assists.len() == 2 {
                assert_ne!(assists[0], assists[1]);
            }
        }
    }

    #[test]
    fn assist_count_is_uniform() {
        let roster = roster();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut counts = [0usize; 3];
        let trials = 9_000;
        for _ in 0..trials {
            counts[pick_assists(&roster[0], &roster, &mut rng).len()] += 1;
        }
        let expected = trials as f64 / 3.0;
        // Two degrees of freedom, p = 0.001 -> 13.82.
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        assert!(chi2 < 13.82, "chi-square {chi2}: {counts:?}");
    }

    #[test]
    fn slots_use_primary_then_secondary_weights() {
        let roster = vec![
            skater("Scorer", Position::Center, 0.0, 0.0),
            skater("Playmaker", Position::LeftWing, 50.0, 0.0),
            skater("Trailer", Position::Defense, 0.0, 50.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut two_assist_goals = 0;
        for _ in 0..600 {
            let assists = pick_assists(&roster[0], &roster, &mut rng);
            if let Some(first) = assists.first() {
                assert_eq!(first, "Playmaker");
            }
            if assists.len() == 2 {
                assert_eq!(assists[1], "Trailer");
                two_assist_goals += 1;
            }
        }
        assert!(two_assist_goals > 0);
    }

    #[test]
    fn primary_assister_follows_primary_rate() {
        let roster = roster();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        // Scorer is McDavid: pool is Hyman 15, Kane 12, Bouchard 30, Ekholm 10.
        let weights = [15.0, 12.0, 30.0, 10.0];
        let names = ["Hyman", "Kane", "Bouchard", "Ekholm"];
        let mut counts = [0usize; 4];
        for _ in 0..60_000 {
            let assists = pick_assists(&roster[0], &roster, &mut rng);
            if let Some(first) = assists.first() {
                let i = names.iter().position(|n| n == first).unwrap();
                counts[i] += 1;
            }
        }
        let n: usize = counts.iter().sum();
        let total: f64 = weights.iter().sum();
        let chi2: f64 = counts
            .iter()
            .zip(weights)
            .map(|(&o, w)| {
                let e = n as f64 * w / total;
                (o as f64 - e).powi(2) / e
            })
            .sum();
        assert!(chi2 < 16.27, "chi-square {chi2}: {counts:?}");
    }
}
