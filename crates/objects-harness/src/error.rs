use thiserror::Error;

/// Error types for the acceptance harness
#[derive(Debug, Error)]
pub enum TestError {
    /// HTTP client error (connection refused, DNS, body read)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Transport timed out before a response arrived
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An expectation over a response did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A step ran before the state it reads was established
    #[error("Scenario state missing: no {0}")]
    MissingState(&'static str),

    /// A required field was absent from the current response
    #[error("Field '{0}' not present in the current response")]
    MissingField(String),

    /// A numeric step argument could not be parsed
    #[error("Invalid number for '{field}': {value:?}")]
    InvalidNumber { field: String, value: String },

    /// A value-extraction path could not be parsed
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Test setup failed
    #[error("Test setup failed: {0}")]
    TestSetupFailed(String),
}

impl TestError {
    /// Builds an assertion failure from a formatted message.
    pub fn assertion(message: impl Into<String>) -> Self {
        TestError::Assertion(message.into())
    }

    /// True for failures raised below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, TestError::HttpClient(_) | TestError::Timeout(_))
    }
}

/// Result alias used across the harness
pub type TestResult<T = ()> = Result<T, TestError>;
