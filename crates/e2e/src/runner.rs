//! Suite runner: selects cases, runs each in a fresh fixture scope and
//! reports the outcome

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use conduit_client::{HttpAccessor, TraceEntry, TraceRecorder};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{E2eConfig, TraceMode};
use crate::error::{E2eError, E2eResult};
use crate::fixtures::FixtureScope;
use crate::generators::DataGenerator;

pub type CaseFuture = Pin<Box<dyn Future<Output = E2eResult<()>> + Send>>;
type CaseFn = Arc<dyn Fn(FixtureScope) -> CaseFuture + Send + Sync>;

/// One registered case
#[derive(Clone)]
pub struct TestCase {
    /// `<suite>/<id>`, unique across the catalog
    pub key: String,
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    run: CaseFn,
}

impl TestCase {
    pub fn new<F, Fut>(suite: &str, id: &str, title: &str, tags: &[&str], run: F) -> Self
    where
        F: Fn(FixtureScope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = E2eResult<()>> + Send + 'static,
    {
        Self {
            key: format!("{}/{}", suite, id),
            id: id.to_string(),
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            run: Arc::new(move |scope| Box::pin(run(scope))),
        }
    }

    /// `CON-001 Sign up a new user`
    pub fn name(&self) -> String {
        format!("{} {}", self.id, self.title)
    }

    /// Tags match with or without the leading `@`; the id is an implicit tag
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim_start_matches('@');
        tag == self.id || self.tags.iter().any(|t| t.trim_start_matches('@') == tag)
    }

    pub fn has_id(&self, id: &str) -> bool {
        id == self.id || id == self.key
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Which cases to run; empty lists select everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub tags: Vec<String>,
    pub ids: Vec<String>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn matches(&self, case: &TestCase) -> bool {
        let by_tag = self.tags.is_empty() || self.tags.iter().any(|t| case.has_tag(t));
        let by_id = self.ids.is_empty() || self.ids.iter().any(|id| case.has_id(id));
        by_tag && by_id
    }
}

/// Result of one case run (one repetition, all its attempts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub key: String,
    pub name: String,
    pub repeat: u32,
    pub success: bool,
    pub attempts: u32,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub traces: Vec<AttemptTrace>,
}

impl TestResult {
    /// Passed, but only after a retry
    pub fn is_flaky(&self) -> bool {
        self.success && self.attempts > 1
    }
}

/// Request trace kept for one attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptTrace {
    pub attempt: u32,
    pub entries: Vec<TraceEntry>,
}

/// Result of running a selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub flaky: usize,
    /// Catalog cases left out by the selection
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl SuiteResult {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runner settings
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub retries: u32,
    pub repeat_each: u32,
    pub workers: usize,
    pub test_timeout: Duration,
    pub trace_mode: TraceMode,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from(&E2eConfig::default())
    }
}

impl From<&E2eConfig> for RunnerConfig {
    fn from(config: &E2eConfig) -> Self {
        Self {
            retries: config.retries,
            repeat_each: config.repeat_each,
            workers: config.workers.max(1),
            test_timeout: config.test_timeout,
            trace_mode: config.trace_mode,
            output_dir: config.output_dir.clone(),
        }
    }
}

/// Runs catalog cases against one API
pub struct SuiteRunner {
    config: RunnerConfig,
    http: HttpAccessor,
    generator: Arc<DataGenerator>,
    cases: Vec<TestCase>,
}

impl SuiteRunner {
    pub fn new(
        config: RunnerConfig,
        http: HttpAccessor,
        generator: DataGenerator,
        cases: Vec<TestCase>,
    ) -> Self {
        Self {
            config,
            http,
            generator: Arc::new(generator),
            cases,
        }
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Cases matching `selection`, in catalog order.
    ///
    /// A requested id that matches nothing is an error, as is a selection
    /// that matches no case at all.
    pub fn select(&self, selection: &Selection) -> E2eResult<Vec<&TestCase>> {
        for id in &selection.ids {
            if !self.cases.iter().any(|c| c.has_id(id)) {
                return Err(E2eError::UnknownCase(id.clone()));
            }
        }

        let selected: Vec<&TestCase> = self.cases.iter().filter(|c| selection.matches(c)).collect();
        if selected.is_empty() {
            let wanted = selection
                .tags
                .iter()
                .chain(selection.ids.iter())
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            return Err(E2eError::UnknownCase(wanted));
        }
        Ok(selected)
    }

    pub async fn run(&self, selection: &Selection) -> E2eResult<SuiteResult> {
        let selected = self.select(selection)?;
        let started_at = Utc::now();
        let start = Instant::now();

        let mut runs = Vec::new();
        for case in &selected {
            for repeat in 0..=self.config.repeat_each {
                runs.push((runs.len(), *case, repeat));
            }
        }

        info!(
            "Running {} test(s) using {} worker(s)...",
            runs.len(),
            self.config.workers
        );

        let mut results: Vec<(usize, TestResult)> = stream::iter(runs)
            .map(|(index, case, repeat)| async move { (index, self.run_case(case, repeat).await) })
            .buffer_unordered(self.config.workers)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);
        let results: Vec<TestResult> = results.into_iter().map(|(_, r)| r).collect();

        let passed = results.iter().filter(|r| r.success).count();
        let flaky = results.iter().filter(|r| r.is_flaky()).count();
        let failed = results.len() - passed;
        let skipped = self.cases.len() - selected.len();
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Test Results: {} passed, {} failed, {} flaky, {} skipped ({} ms)",
            passed, failed, flaky, skipped, duration_ms
        );

        Ok(SuiteResult {
            started_at,
            total: results.len(),
            passed,
            failed,
            flaky,
            skipped,
            duration_ms,
            results,
        })
    }

    /// Run one repetition of a case, retrying on failure
    pub async fn run_case(&self, case: &TestCase, repeat: u32) -> TestResult {
        let start = Instant::now();
        let mut traces = Vec::new();
        let mut last_error = None;
        let mut attempts = 0;

        for attempt in 0..=self.config.retries {
            attempts = attempt + 1;
            debug!("Running test: {} (attempt {})", case.key, attempts);

            let recorder = TraceRecorder::new();
            let http = self.http.clone().with_trace(recorder.clone());
            let scope = FixtureScope::new(http, self.generator.clone());

            let outcome = match tokio::time::timeout(self.config.test_timeout, (case.run)(scope)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(E2eError::Timeout {
                    case: case.key.clone(),
                    timeout_ms: self.config.test_timeout.as_millis() as u64,
                }),
            };

            let failed = outcome.is_err();
            if self.config.trace_mode.retains(attempt, failed) {
                traces.push(AttemptTrace {
                    attempt,
                    entries: recorder.take(),
                });
            }

            match outcome {
                Ok(()) => {
                    last_error = None;
                    break;
                }
                Err(e) => {
                    if attempt < self.config.retries {
                        warn!("Retrying {} after failure: {}", case.key, e);
                    }
                    last_error = Some(e.to_string());
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        match &last_error {
            None => info!("✓ {} ({} ms)", case.name(), duration_ms),
            Some(e) => error!("✗ {} - {}", case.name(), e),
        }

        TestResult {
            key: case.key.clone(),
            name: case.name(),
            repeat,
            success: last_error.is_none(),
            attempts,
            duration_ms,
            error: last_error,
            traces,
        }
    }

    /// Write results to `<output>/test-results.json`
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(suite: &str, id: &str, tags: &[&str]) -> TestCase {
        TestCase::new(suite, id, "title", tags, |_scope| async { Ok(()) })
    }

    #[test]
    fn test_tag_matching() {
        let c = case("users", "CON-001", &["@signup"]);
        assert!(c.has_tag("@signup"));
        assert!(c.has_tag("signup"));
        assert!(c.has_tag("@CON-001"));
        assert!(!c.has_tag("@signin"));
        assert_eq!(c.key, "users/CON-001");
        assert_eq!(c.name(), "CON-001 title");
    }

    #[test]
    fn test_selection() {
        let a = case("search", "CON-021", &["@search"]);
        let b = case("articles", "CON-021", &["@deleteArticle"]);

        assert!(Selection::all().matches(&a));
        assert!(Selection::all().id("CON-021").matches(&a));
        assert!(Selection::all().id("CON-021").matches(&b));
        assert!(Selection::all().id("search/CON-021").matches(&a));
        assert!(!Selection::all().id("search/CON-021").matches(&b));
        assert!(!Selection::all().tag("@search").id("articles/CON-021").matches(&b));
    }
}
