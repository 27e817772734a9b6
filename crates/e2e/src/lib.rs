//! Conduit API contract suite
//!
//! Drives a live Conduit-style API through `conduit-client` and checks
//! status codes, response shapes and business rules:
//! - Builds per-case preconditions through a memoized fixture graph
//! - Records soft assertions so every failed check of a case is reported
//! - Generates run-scoped random users, articles and comments
//! - Runs the scenario catalog with retries, repeats, timeouts and workers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     SuiteRunner                             │
//! │    ├── select(Selection) -> [TestCase]                      │
//! │    ├── run_case(case) -> TestResult   (timeout, retries)    │
//! │    └── write_results(SuiteResult) -> test-results.json      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestCase (suites::catalog)                                 │
//! │    └── async fn(FixtureScope) -> SoftAssertions::finish()   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FixtureScope (one per attempt)                             │
//! │    API ─> registeredUser ─┬─> editedUserProfile             │
//! │                           └─> createdArticle                │
//! │                                 └─> createdArticleWithComment│
//! ├─────────────────────────────────────────────────────────────┤
//! │  DataGenerator                 conduit_client::ApiHandle     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod assertions;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod generators;
pub mod runner;
pub mod suites;
pub mod tables;

pub use assertions::SoftAssertions;
pub use config::{E2eConfig, TraceMode};
pub use error::{E2eError, E2eResult};
pub use fixtures::{FixtureKey, FixtureScope};
pub use generators::DataGenerator;
pub use runner::{RunnerConfig, Selection, SuiteResult, SuiteRunner, TestCase, TestResult};
