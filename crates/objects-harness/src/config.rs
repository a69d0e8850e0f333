//! Runner configuration for the acceptance suite.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Tag that marks scenarios still being written.
pub const WIP_TAG: &str = "wip";

/// Tag that marks scenarios hitting a real, remote deployment.
pub const LIVE_TAG: &str = "live";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    /// Per-request timeout applied to the HTTP client
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Directory holding the `.feature` files
    #[serde(default = "default_features_dir")]
    pub features_dir: PathBuf,

    /// Scenarios carrying any of these tags are skipped
    #[serde(default = "default_excluded_tags")]
    pub excluded_tags: Vec<String>,

    /// Upper bound on scenarios run at once
    #[serde(default = "default_max_concurrent_scenarios")]
    pub max_concurrent_scenarios: usize,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_features_dir() -> PathBuf {
    PathBuf::from("features")
}

fn default_excluded_tags() -> Vec<String> {
    vec![WIP_TAG.to_string(), LIVE_TAG.to_string()]
}

fn default_max_concurrent_scenarios() -> usize {
    4
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            features_dir: default_features_dir(),
            excluded_tags: default_excluded_tags(),
            max_concurrent_scenarios: default_max_concurrent_scenarios(),
        }
    }
}

impl TestConfig {
    /// Load configuration from environment variables over the defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(secs) = env::var("OBJECTS_BDD_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.request_timeout = Duration::from_secs(secs),
                Err(_) => warn!("Invalid OBJECTS_BDD_TIMEOUT_SECS value: {}", secs),
            }
        }

        if let Ok(dir) = env::var("OBJECTS_BDD_FEATURES") {
            config.features_dir = PathBuf::from(dir);
        }

        if let Ok(tags) = env::var("OBJECTS_BDD_EXCLUDE_TAGS") {
            config.excluded_tags = parse_tag_list(&tags);
        }

        if let Ok(limit) = env::var("OBJECTS_BDD_CONCURRENCY") {
            match limit.parse::<usize>() {
                Ok(limit) if limit > 0 => config.max_concurrent_scenarios = limit,
                _ => warn!("Invalid OBJECTS_BDD_CONCURRENCY value: {}", limit),
            }
        }

        config
    }

    /// Stop excluding `tag`.
    pub fn include_tag(mut self, tag: &str) -> Self {
        let tag = normalize_tag(tag);
        self.excluded_tags.retain(|t| *t != tag);
        self
    }

    /// Whether a scenario carrying `tags` should be filtered out.
    pub fn is_excluded<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter()
            .any(|tag| self.excluded_tags.iter().any(|ex| *ex == normalize_tag(tag)))
    }
}

/// Splits a comma separated tag list, dropping blanks and leading `@`.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect()
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('@').to_string()
}
