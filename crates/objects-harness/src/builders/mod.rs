//! Environment setup builders for the acceptance suite.
//!
//! This module provides a builder for an in-process objects API server so
//! scenarios can run without a remote deployment.

mod test_server;

pub use test_server::*;
