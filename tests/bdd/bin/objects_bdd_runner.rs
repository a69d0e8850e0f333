//! Runs the objects API features with command line control over tags,
//! concurrency and timeouts.

#[path = "../runner.rs"]
mod runner;
#[path = "../steps/mod.rs"]
mod steps;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use objects_harness::config::{LIVE_TAG, WIP_TAG};
use objects_harness::TestConfig;

#[derive(Debug, Parser)]
#[command(name = "objects-bdd-runner", about = "Run the objects API acceptance features")]
struct Cli {
    /// Directory or single `.feature` file to run
    #[arg(long)]
    features: Option<PathBuf>,

    /// Also run scenarios tagged @live (public deployment)
    #[arg(long)]
    include_live: bool,

    /// Also run scenarios tagged @wip
    #[arg(long)]
    include_wip: bool,

    /// Maximum scenarios run at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn apply(self, mut config: TestConfig) -> Result<TestConfig> {
        if let Some(features) = self.features {
            let features = features
                .canonicalize()
                .with_context(|| format!("Feature path not found: {}", features.display()))?;
            config.features_dir = features;
        }
        if let Some(concurrency) = self.concurrency {
            ensure!(concurrency > 0, "--concurrency must be at least 1");
            config.max_concurrent_scenarios = concurrency;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if self.include_live {
            config = config.include_tag(LIVE_TAG);
        }
        if self.include_wip {
            config = config.include_tag(WIP_TAG);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    runner::init_tracing();

    let config = Cli::parse()
        .apply(TestConfig::load())
        .context("Invalid runner options")?;

    runner::run_features(config, false).await;
    Ok(())
}
