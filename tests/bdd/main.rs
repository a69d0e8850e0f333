//! Objects API acceptance suite.
//!
//! ```bash
//! # Offline scenarios against the in-memory API
//! cargo test -p objects-bdd-tests --test bdd
//!
//! # Only scenarios whose name matches
//! cargo test -p objects-bdd-tests --test bdd -- --name "special characters"
//!
//! # Include the scenarios that hit the public deployment
//! OBJECTS_BDD_EXCLUDE_TAGS=wip cargo test -p objects-bdd-tests --test bdd
//! ```

mod runner;
mod steps;

use objects_harness::TestConfig;

#[tokio::main]
async fn main() {
    runner::init_tracing();
    runner::run_features(TestConfig::load(), true).await;
}
