// Injury risk, the injury catalog and the per-game injury state machine.
//
// healthy --(roll < risk)--> injured(n) --(each game: n-1)--> ... --(n <= 0)--> healthy

use rand::seq::SliceRandom;
use rand::Rng;
use rinksim_core::config::SimParams;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::model::InjuryState;

/// One kind of injury and how many games it can keep a player out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryCatalogEntry {
    pub name: String,
    pub min_games: u32,
    pub max_games: u32,
}

/// Per-game injury probability from last season's games played.
///
/// Players who missed more of last season are treated as more injury-prone:
/// `clamp((season - gp) / divisor / season, min_risk, 1)`.
pub fn injury_risk(games_played_last_season: f64, params: &SimParams) -> f64 {
    let season = params.season_games;
    ((season - games_played_last_season) / params.injury_risk_divisor / season)
        .clamp(params.min_injury_risk, 1.0)
}

/// Result of evaluating one player for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjuryStep {
    pub next: InjuryState,
    pub newly_injured: bool,
}

/// Draws injuries from a validated catalog.
#[derive(Debug, Clone)]
pub struct InjuryModel {
    catalog: Vec<InjuryCatalogEntry>,
}

impl InjuryModel {
    pub fn new(catalog: Vec<InjuryCatalogEntry>) -> Result<Self, SimError> {
        if catalog.is_empty() {
            return Err(SimError::EmptyInjuryCatalog);
        }
        for entry in &catalog {
            if entry.min_games > entry.max_games {
                return Err(SimError::InvalidInjuryRange {
                    name: entry.name.clone(),
                    min_games: entry.min_games,
                    max_games: entry.max_games,
                });
            }
        }
        Ok(InjuryModel { catalog })
    }

    pub fn catalog(&self) -> &[InjuryCatalogEntry] {
        &self.catalog
    }

    /// Advance an injured player by one missed game.
    pub fn recover(state: &InjuryState) -> InjuryState {
        match state {
            InjuryState::Healthy => InjuryState::Healthy,
            InjuryState::Injured { injury, games_left } => {
                let left = games_left.saturating_sub(1);
                if left == 0 {
                    InjuryState::Healthy
                } else {
                    InjuryState::Injured {
                        injury: injury.clone(),
                        games_left: left,
                    }
                }
            }
        }
    }

    /// Roll a healthy player for a new injury. A drawn duration of zero
    /// still costs the next game.
    pub fn roll<R: Rng + ?Sized>(&self, risk: f64, rng: &mut R) -> Option<InjuryState> {
        if rng.gen::<f64>() >= risk {
            return None;
        }
        let entry = self.catalog.choose(rng)?;
        let games_left = rng.gen_range(entry.min_games..=entry.max_games).max(1);
        Some(InjuryState::Injured {
            injury: entry.name.clone(),
            games_left,
        })
    }

    /// One game's transition: injured players count down, healthy players
    /// roll for a new injury.
    pub fn step<R: Rng + ?Sized>(&self, state: &InjuryState, risk: f64, rng: &mut R) -> InjuryStep {
        if !state.is_healthy() {
            return InjuryStep {
                next: Self::recover(state),
                newly_injured: false,
            };
        }
        match self.roll(risk, rng) {
            Some(next) => InjuryStep {
                next,
                newly_injured: true,
            },
            None => InjuryStep {
                next: InjuryState::Healthy,
                newly_injured: false,
            },
        }
    }
}
