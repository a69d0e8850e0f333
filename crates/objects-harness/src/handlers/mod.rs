//! Step handlers grouped by Gherkin keyword.
//!
//! Handlers are plain async functions over a [`ScenarioContext`](crate::context::ScenarioContext)
//! so any step-matching driver can call them.

pub mod given;
pub mod then;
pub mod when;

/// Absolute tolerance for numeric comparisons.
pub const NUMERIC_TOLERANCE: f64 = 0.01;

/// Status the objects API returns for a successful create.
pub const CREATED_STATUS: u16 = 200;
