//! Error types for the contract suite

use conduit_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Fixture {fixture} failed: expected HTTP {expected}, got {actual}: {body}")]
    FixtureFailed {
        fixture: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{case}: {} of {total} check(s) failed:\n{}", .failures.len(), .failures.join("\n"))]
    AssertionsFailed {
        case: String,
        total: usize,
        failures: Vec<String>,
    },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Data generation failed: {0}")]
    DataGeneration(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Timeout after {timeout_ms} ms: {case}")]
    Timeout { case: String, timeout_ms: u64 },

    #[error("No test case matches: {0}")]
    UnknownCase(String),

    #[error("Test table parse error: {0}")]
    TableParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
