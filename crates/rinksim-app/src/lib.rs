// Season run wiring shared by the binary and the integration tests.

pub mod export;
pub mod report;

use anyhow::Context;
use rinksim_core::config::Config;
use rinksim_core::rng;
use rinksim_hockey::data;
use rinksim_hockey::season::{simulate_season, SeasonOutcome};
use tracing::info;

/// A finished run and the seed that reproduces it.
#[derive(Debug)]
pub struct SeasonRun {
    pub seed: u64,
    pub outcome: SeasonOutcome,
}

/// Load every input named in `config` and simulate the season.
pub fn run_season(config: &Config) -> anyhow::Result<SeasonRun> {
    let seed = rng::resolve_seed(config.season.seed);
    info!("Simulating season with seed {}", seed);

    let season_data = data::load_all(config).context("failed to load season data")?;
    let ctx = season_data.context(config);
    let mut rng = rng::seeded(seed);

    let outcome = simulate_season(&season_data.schedule, &season_data.league, &ctx, &mut rng);
    Ok(SeasonRun { seed, outcome })
}
