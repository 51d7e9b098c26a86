// rinksim entry point.
//
// 1. Initialize tracing (stderr, so the report on stdout stays clean)
// 2. Load config and apply command-line overrides
// 3. Load data and simulate the season
// 4. Write result files
// 5. Print leaderboards and standings

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rinksim_app::{export, report, run_season};
use rinksim_core::config;
use tracing::info;

#[derive(Parser)]
#[command(name = "rinksim")]
#[command(about = "Simulate a hockey season from historical player rates", long_about = None)]
struct Cli {
    /// Config file (default: config/rinksim.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the run; overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the result files; overrides the config
    #[arg(long)]
    output: Option<PathBuf>,

    /// Leaderboard size; overrides the config
    #[arg(long)]
    top: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let mut config =
        config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(seed) = cli.seed {
        config.season.seed = Some(seed);
    }
    if let Some(dir) = &cli.output {
        config.output.dir = dir.display().to_string();
    }
    if let Some(top) = cli.top {
        anyhow::ensure!(top > 0, "--top must be greater than 0");
        config.output.leaderboard_size = top;
    }

    let run = run_season(&config)?;

    let out_dir = PathBuf::from(&config.output.dir);
    export::write_all(&out_dir, &run.outcome).context("failed to write results")?;

    print!(
        "{}",
        report::leaderboards(&run.outcome.accumulator, config.output.leaderboard_size)
    );
    print!("{}", report::standings_table(&run.outcome.standings));

    info!("Done (seed {})", run.seed);
    Ok(())
}

/// Initialize tracing to stderr, filtered by `RUST_LOG`.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rinksim=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
