//! Suite configuration read from the environment

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use conduit_client::HttpAccessor;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{E2eError, E2eResult};

/// Password used for generated users unless `NEW_USER_PASSWORD` is set
pub const DEFAULT_USER_PASSWORD: &str = "Test1234!";

/// Namespace for generated data when `E2E_RUN_PREFIX` is unset; fixed per process
static RUN_PREFIX: Lazy<String> =
    Lazy::new(|| uuid::Uuid::new_v4().simple().to_string()[..6].to_string());

/// When a case's request trace is kept in the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceMode {
    On,
    Off,
    #[default]
    RetainOnFailure,
    OnFirstRetry,
}

impl TraceMode {
    /// Parse a mode, falling back to `retain-on-failure` for unknown values
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Whether the trace of `attempt` (0 = first run) is kept
    pub fn retains(&self, attempt: u32, failed: bool) -> bool {
        match self {
            TraceMode::On => true,
            TraceMode::Off => false,
            TraceMode::RetainOnFailure => failed,
            TraceMode::OnFirstRetry => attempt == 1,
        }
    }
}

impl FromStr for TraceMode {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "on" => Ok(TraceMode::On),
            "off" => Ok(TraceMode::Off),
            "retain-on-failure" => Ok(TraceMode::RetainOnFailure),
            "on-first-retry" => Ok(TraceMode::OnFirstRetry),
            other => Err(E2eError::Config(format!("unknown trace mode '{}'", other))),
        }
    }
}

/// Complete suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct E2eConfig {
    /// Base URL of the API under test; required for live runs
    pub base_url: Option<String>,

    /// Extra attempts for a failing case
    pub retries: u32,

    /// Extra repetitions of every selected case
    pub repeat_each: u32,

    /// Cases run at once
    pub workers: usize,

    /// Per-case timeout
    #[serde(with = "duration_ms")]
    pub test_timeout: Duration,

    /// Per-request timeout handed to the HTTP client
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,

    pub trace_mode: TraceMode,

    /// Password for generated users
    pub new_user_password: String,

    /// Namespace mixed into generated usernames
    pub run_prefix: String,

    /// Directory for the JSON report
    pub output_dir: PathBuf,
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            retries: 0,
            repeat_each: 0,
            workers: 1,
            test_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            trace_mode: TraceMode::default(),
            new_user_password: DEFAULT_USER_PASSWORD.to_string(),
            run_prefix: RUN_PREFIX.clone(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

impl E2eConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> E2eResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> E2eResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("API_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Some(v) = get("RETRIES") {
            config.retries = parse_number("RETRIES", &v)?;
        }
        if let Some(v) = get("REPEAT") {
            config.repeat_each = parse_number("REPEAT", &v)?;
        }
        if let Some(v) = get("WORKERS") {
            config.workers = parse_number("WORKERS", &v)?;
        }
        if let Some(v) = get("TEST_TIMEOUT") {
            config.test_timeout = Duration::from_millis(parse_number("TEST_TIMEOUT", &v)?);
        }
        if let Some(v) = get("REQUEST_TIMEOUT") {
            config.request_timeout = Duration::from_millis(parse_number("REQUEST_TIMEOUT", &v)?);
        }
        if let Some(v) = get("TRACE_VALUE") {
            config.trace_mode = TraceMode::parse_lossy(&v);
        }
        if let Some(v) = get("NEW_USER_PASSWORD") {
            config.new_user_password = v;
        }
        if let Some(v) = get("E2E_RUN_PREFIX") {
            config.run_prefix = v;
        }
        if let Some(v) = get("E2E_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> E2eResult<()> {
        if self.workers == 0 {
            return Err(E2eError::Config("WORKERS must be at least 1".to_string()));
        }
        if self.test_timeout.is_zero() {
            return Err(E2eError::Config("TEST_TIMEOUT must be positive".to_string()));
        }
        Ok(())
    }

    /// HTTP accessor for the configured base URL
    pub fn http_accessor(&self) -> E2eResult<HttpAccessor> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| E2eError::Config("API_BASE_URL is not set".to_string()))?;
        Ok(HttpAccessor::with_timeout(base_url, self.request_timeout)?)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> E2eResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| E2eError::Config(format!("{} must be a non-negative integer, got '{}'", key, value)))
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
