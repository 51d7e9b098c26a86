// Starting goalie selection and save-percentage context.

use rand::Rng;
use rinksim_core::config::SimParams;
use rinksim_core::weighted::choose_weighted;

use crate::model::Goalie;

/// Share of a full season the goalie has carried, capped at 1.
pub fn workload_weight(goalie: &Goalie, params: &SimParams) -> f64 {
    (goalie.stats.games_played / params.season_games).min(1.0)
}

/// Pick tonight's starter, weighted by season-to-date workload.
///
/// Returns `None` when the team has no goalie with a positive workload.
pub fn select_starter<'a, R: Rng + ?Sized>(
    goalies: &'a [Goalie],
    params: &SimParams,
    rng: &mut R,
) -> Option<&'a Goalie> {
    choose_weighted(goalies, |g| workload_weight(g, params), rng)
}

/// Save percentage shooters face against `goalie`, falling back to the
/// configured league default when there is no starter or no shot history.
pub fn save_pct_against(goalie: Option<&Goalie>, params: &SimParams) -> f64 {
    goalie
        .and_then(|g| g.stats.save_pct())
        .unwrap_or(params.default_save_pct)
}
