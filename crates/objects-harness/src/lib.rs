//! Scenario-execution core for acceptance testing the objects REST API.
//!
//! A [`ScenarioContext`] carries one scenario's state between independently
//! matched steps. The [`handlers`] read and write it, and [`lifecycle`]
//! deletes every object a scenario created, pass or fail. [`builders`]
//! provides an in-process implementation of the API for offline runs.

pub mod builders;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod model;
pub mod response;
pub mod server;

/// Re-export commonly used types for convenience
pub use mockall;

pub use client::{MockObjectTransport, ObjectTransport, RestApiClient};
pub use config::TestConfig;
pub use context::ScenarioContext;
pub use error::{TestError, TestResult};
pub use model::{AttributeValue, DomainObject};
pub use response::ResponseSnapshot;
