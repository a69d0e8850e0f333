//! Cucumber wiring shared by the `bdd` test target and the runner binary.

use std::path::PathBuf;

use cucumber::event::ScenarioFinished;
use cucumber::World as _;
use objects_harness::TestConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::steps::world::ObjectsWorld;

const DEFAULT_LOG_FILTER: &str = "info,objects_harness=debug";

/// Installs the fmt subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Relative feature paths are resolved against this crate.
pub fn features_path(config: &TestConfig) -> PathBuf {
    if config.features_dir.is_absolute() {
        config.features_dir.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&config.features_dir)
    }
}

/// Runs every feature under the configured directory and exits non-zero on
/// failure.
///
/// With `parse_cli` unset cucumber's own command line parsing is skipped, for
/// callers that parse the arguments themselves.
pub async fn run_features(config: TestConfig, parse_cli: bool) {
    let features = features_path(&config);
    info!(
        features = %features.display(),
        excluded_tags = ?config.excluded_tags,
        concurrency = config.max_concurrent_scenarios,
        "Running objects API features"
    );

    let mut cucumber = ObjectsWorld::cucumber()
        .max_concurrent_scenarios(config.max_concurrent_scenarios)
        .before(|_feature, _rule, scenario, world| {
            Box::pin(async move {
                world.begin(&scenario.name, &scenario.tags);
            })
        })
        .after(|_feature, _rule, scenario, event, world| {
            let failed = matches!(
                event,
                ScenarioFinished::StepFailed(..) | ScenarioFinished::BeforeHookFailed(..)
            );
            Box::pin(async move {
                if let Some(world) = world {
                    world.finish(&scenario.name, failed).await;
                }
            })
        })
        .fail_on_skipped();

    if !parse_cli {
        cucumber = cucumber.with_default_cli();
    }

    cucumber
        .filter_run_and_exit(features, move |feature, rule, scenario| {
            let tags = feature
                .tags
                .iter()
                .chain(rule.into_iter().flat_map(|r| r.tags.iter()))
                .chain(scenario.tags.iter());
            !config.is_excluded(tags)
        })
        .await;
}
