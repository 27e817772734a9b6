//! Suite runner tests: selection, retries, repeats, timeouts, trace
//! retention and the JSON report

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use conduit_client::HttpAccessor;
use conduit_e2e::assertions::{expect_status_code, SoftAssertions};
use conduit_e2e::{
    DataGenerator, E2eError, RunnerConfig, Selection, SuiteResult, SuiteRunner, TestCase,
    TraceMode,
};
use mockito::{Mock, Server, ServerGuard};

fn config(output_dir: &std::path::Path) -> RunnerConfig {
    RunnerConfig {
        retries: 0,
        repeat_each: 0,
        workers: 2,
        test_timeout: Duration::from_secs(5),
        trace_mode: TraceMode::RetainOnFailure,
        output_dir: output_dir.to_path_buf(),
    }
}

fn runner(server: &ServerGuard, config: RunnerConfig, cases: Vec<TestCase>) -> SuiteRunner {
    let http = HttpAccessor::with_timeout(&server.url(), Duration::from_secs(5)).unwrap();
    let generator = DataGenerator::new("Test1234!", "rn01").unwrap();
    SuiteRunner::new(config, http, generator, cases)
}

/// Case that lists tags and expects `code`
fn tags_case(id: &str, code: u16) -> TestCase {
    let case_id = id.to_string();
    TestCase::new("tags", id, "list tags", &["@tags"], move |scope| {
        let case_id = case_id.clone();
        async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new(case_id);
            let response = api.tags.list().await?;
            expect_status_code(&mut soft, &response, code);
            soft.finish()
        }
    })
}

/// Server answering `GET /api/tags`; the mock lives as long as the returned handle
async fn tags_server() -> (ServerGuard, Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"tags":["kos"]}"#)
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn runs_selection_and_reports_failures() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(
        &server,
        config(dir.path()),
        vec![tags_case("CON-900", 200), tags_case("CON-901", 201)],
    );

    let result = runner.run(&Selection::all().tag("@tags")).await.unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.passed, 1);
    assert_eq!(result.failed, 1);
    assert!(!result.is_success());
    assert_eq!(result.results[0].key, "tags/CON-900");
    assert!(result.results[0].success);

    let failure = &result.results[1];
    assert!(!failure.success);
    assert!(failure.error.as_deref().unwrap().contains("response status code is 201"));

    // retain-on-failure keeps only the failed case's requests
    assert!(result.results[0].traces.is_empty());
    assert_eq!(failure.traces.len(), 1);
    assert_eq!(failure.traces[0].entries[0].path, "/api/tags");
    assert_eq!(failure.traces[0].entries[0].status, Some(200));
}

#[tokio::test]
async fn unknown_ids_are_rejected() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(&server, config(dir.path()), vec![tags_case("CON-900", 200)]);

    let err = runner.run(&Selection::all().id("CON-404")).await.unwrap_err();
    assert!(matches!(err, E2eError::UnknownCase(ref id) if id == "CON-404"));

    let err = runner.select(&Selection::all().tag("@nothing")).unwrap_err();
    assert!(matches!(err, E2eError::UnknownCase(_)));
}

#[tokio::test]
async fn selection_counts_skipped_cases() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(
        &server,
        config(dir.path()),
        vec![tags_case("CON-900", 200), tags_case("CON-901", 200), tags_case("CON-902", 200)],
    );

    let result = runner.run(&Selection::all().id("tags/CON-901")).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.skipped, 2);
    assert_eq!(result.results[0].name, "CON-901 list tags");
}

#[tokio::test]
async fn failing_case_is_retried() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicU32::new(0));

    let counter = calls.clone();
    let flaky = TestCase::new("misc", "CON-910", "passes on second try", &[], move |_scope| {
        let counter = counter.clone();
        async move {
            let mut soft = SoftAssertions::new("CON-910");
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            soft.record("second attempt", attempt >= 1, None);
            soft.finish()
        }
    });

    let mut cfg = config(dir.path());
    cfg.retries = 2;
    cfg.trace_mode = TraceMode::OnFirstRetry;
    let runner = runner(&server, cfg, vec![flaky]);

    let result = runner.run(&Selection::all()).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(result.passed, 1);
    assert_eq!(result.flaky, 1);
    assert_eq!(result.results[0].attempts, 2);
    assert!(result.results[0].error.is_none());
    assert_eq!(result.results[0].traces.len(), 1);
    assert_eq!(result.results[0].traces[0].attempt, 1);
}

#[tokio::test]
async fn slow_case_times_out() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let slow = TestCase::new("misc", "CON-920", "sleeps", &[], |_scope| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    });

    let mut cfg = config(dir.path());
    cfg.test_timeout = Duration::from_millis(50);
    let runner = runner(&server, cfg, vec![slow]);

    let result = runner.run(&Selection::all()).await.unwrap();

    assert_eq!(result.failed, 1);
    assert!(result.results[0].error.as_deref().unwrap().contains("Timeout after 50 ms"));
}

#[tokio::test]
async fn repeat_each_runs_extra_copies() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.repeat_each = 2;
    cfg.trace_mode = TraceMode::On;
    let runner = runner(&server, cfg, vec![tags_case("CON-900", 200)]);

    let result = runner.run(&Selection::all()).await.unwrap();

    let repeats: Vec<u32> = result.results.iter().map(|r| r.repeat).collect();
    assert_eq!(repeats, vec![0, 1, 2]);
    assert!(result.results.iter().all(|r| r.traces.len() == 1));
}

#[tokio::test]
async fn results_are_written_as_json() {
    let (server, _tags) = tags_server().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(&server, config(dir.path()), vec![tags_case("CON-900", 200)]);

    let result = runner.run(&Selection::all()).await.unwrap();
    let path = runner.write_results(&result).unwrap();

    assert_eq!(path, dir.path().join("test-results.json"));
    let written: SuiteResult = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.total, 1);
    assert_eq!(written.passed, 1);
    assert_eq!(written.results[0].key, "tags/CON-900");
}
