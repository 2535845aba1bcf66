//! Demo binary: runs the three orchestration strategies against the
//! reference fixtures.
//!
//! # Usage
//!
//! Reference run (real latency, 20% failure per fetch):
//! ```bash
//! cargo run --bin mockfetch
//! ```
//!
//! Reproducible run with no latency:
//! ```bash
//! cargo run --bin mockfetch -- --seed 42 --fast
//! ```
//!
//! Randomized latencies and failure probabilities, reproducible by seed:
//! ```bash
//! cargo run --bin mockfetch -- --chaos --seed 7
//! ```
//!
//! Progress lines go to stdout. Simulated failures are printed to stderr as
//! `Error: ...` lines; the process still exits successfully.

use clap::Parser;
use mockfetch::{
    run_demo, ConfigError, FetchConfiguration, FixtureStore, Providers, SeededRandomProvider,
    SimProviders, SimulatedFetcher, TokioProviders, TokioRandomProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "mockfetch")]
#[command(about = "Sequential, parallel and chained fetches over a flaky mock backend")]
#[command(long_about = None)]
struct Args {
    /// Seed the failure injection RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Failure probability applied to every fetch (0.0 - 1.0)
    #[arg(long)]
    failure_probability: Option<f64>,

    /// Skip the simulated latency
    #[arg(long)]
    fast: bool,

    /// Randomize per-operation latency and failure probability
    #[arg(long)]
    chaos: bool,
}

impl Args {
    fn configuration(&self) -> FetchConfiguration {
        let mut config = match (self.chaos, self.seed) {
            (true, Some(seed)) => {
                FetchConfiguration::random_for_seed(&SeededRandomProvider::new(seed))
            }
            (true, None) => FetchConfiguration::random_for_seed(&TokioRandomProvider::new()),
            (false, _) => FetchConfiguration::default(),
        };
        if let Some(probability) = self.failure_probability {
            config = config.with_failure_probability(probability);
        }
        if self.fast {
            config = config.without_latency();
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,mockfetch=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = args.configuration();
    if args.chaos {
        tracing::info!(?config, "using randomized configuration");
    }

    match args.seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded failure injection");
            run(SimProviders::seeded(seed), config).await?;
        }
        None => run(TokioProviders::new(), config).await?,
    }

    Ok(())
}

async fn run<P: Providers>(providers: P, config: FetchConfiguration) -> Result<(), ConfigError> {
    let fetcher = SimulatedFetcher::new(FixtureStore::reference(), config, providers)?;
    let reports = run_demo(&fetcher, fetcher.providers().time()).await;

    for report in &reports {
        println!("\n{}:", report.strategy);
        for line in report.progress_lines() {
            println!("{line}");
        }
        if let Some(line) = report.error_line() {
            eprintln!("{line}");
        }
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    tracing::info!(
        runs = reports.len(),
        failed,
        stats = ?fetcher.stats(),
        "demo finished"
    );
    Ok(())
}
