//! Error types for the Conduit client

use thiserror::Error;

/// Result type alias using the client error
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response body does not match the {schema} schema ({} violation(s)):\n{}", .violations.len(), .violations.join("\n"))]
    SchemaViolation {
        schema: String,
        violations: Vec<String>,
    },

    #[error("Invalid {schema} schema definition: {reason}")]
    SchemaDefinition { schema: String, reason: String },

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl ClientError {
    /// Every violation when this is a schema mismatch, empty otherwise
    pub fn violations(&self) -> &[String] {
        match self {
            ClientError::SchemaViolation { violations, .. } => violations,
            _ => &[],
        }
    }
}
