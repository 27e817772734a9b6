//! Soft assertions
//!
//! A failed check is recorded and logged, never raised on the spot, so the
//! remaining checks of a case still run. `SoftAssertions::finish` turns the
//! record into a single pass/fail result listing every failed check.

use conduit_client::{ApiHandle, ApiResponse, ResponseSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};

/// Properties compared by length in `expect_property_equals`
pub const LIST_PROPERTIES: [&str; 3] = ["articles", "comments", "tags"];

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub description: String,
    pub passed: bool,
    pub detail: Option<String>,
}

/// Record of every check made by one case
#[derive(Debug, Clone)]
pub struct SoftAssertions {
    case: String,
    outcomes: Vec<CheckOutcome>,
}

impl SoftAssertions {
    pub fn new(case: impl Into<String>) -> Self {
        Self {
            case: case.into(),
            outcomes: Vec::new(),
        }
    }

    /// Record one check; failures are logged immediately
    pub fn record(&mut self, description: impl Into<String>, passed: bool, detail: Option<String>) {
        let description = description.into();
        if passed {
            debug!("[{}] Expect: {} ... ok", self.case, description);
        } else {
            warn!(
                "[{}] Expect: {} ... FAILED {}",
                self.case,
                description,
                detail.as_deref().unwrap_or("")
            );
        }
        self.outcomes.push(CheckOutcome {
            description,
            passed,
            detail,
        });
    }

    pub fn case(&self) -> &str {
        &self.case
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> Vec<&CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }

    pub fn is_passing(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// `Ok` when every check passed, otherwise one error naming each failure
    pub fn finish(self) -> E2eResult<()> {
        if self.is_passing() {
            return Ok(());
        }

        let total = self.outcomes.len();
        let failures = self
            .outcomes
            .into_iter()
            .filter(|o| !o.passed)
            .map(|o| match o.detail {
                Some(detail) => format!("{} ({})", o.description, detail),
                None => o.description,
            })
            .collect();

        Err(E2eError::AssertionsFailed {
            case: self.case,
            total,
            failures,
        })
    }
}

/// JavaScript-style truthiness: null, false, 0, "" and missing are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn expect_status_code(soft: &mut SoftAssertions, response: &ApiResponse, code: u16) {
    let actual = response.status();
    let detail = (actual != code).then(|| format!("got {}: {}", actual, truncate(&response.text(), 200)));
    soft.record(format!("response status code is {}", code), actual == code, detail);
}

pub fn expect_has_property(soft: &mut SoftAssertions, obj: &Value, name: &str) {
    let present = obj.get(name).is_some();
    let detail = (!present).then(|| format!("in {}", truncate(&obj.to_string(), 200)));
    soft.record(format!("response has property '{}'", name), present, detail);
}

/// Compare a property to `expected`.
///
/// For `articles`, `comments` and `tags` the list's length is compared;
/// every other property is compared by value.
pub fn expect_property_equals(
    soft: &mut SoftAssertions,
    obj: &Value,
    name: &str,
    expected: impl Into<Value>,
) {
    let expected = expected.into();
    let actual = obj.get(name).unwrap_or(&Value::Null);

    if LIST_PROPERTIES.contains(&name) {
        let description = format!("'{}' has {} item(s)", name, expected);
        let (passed, detail) = match (actual.as_array(), expected.as_u64()) {
            (Some(items), Some(count)) => {
                let passed = items.len() as u64 == count;
                (passed, (!passed).then(|| format!("found {}", items.len())))
            }
            (None, _) => (false, Some(format!("'{}' is not a list: {}", name, actual))),
            (_, None) => (false, Some(format!("expected count {} is not a count", expected))),
        };
        soft.record(description, passed, detail);
        return;
    }

    let passed = *actual == expected;
    let detail = (!passed).then(|| format!("found {}", actual));
    soft.record(format!("'{}' equals {}", name, expected), passed, detail);
}

/// Substring check for strings, membership check for lists
pub fn expect_property_contains(
    soft: &mut SoftAssertions,
    obj: &Value,
    name: &str,
    expected: impl Into<Value>,
) {
    let expected = expected.into();
    let actual = obj.get(name).unwrap_or(&Value::Null);

    let passed = match (actual, &expected) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), needle) => items.contains(needle),
        _ => false,
    };
    let detail = (!passed).then(|| format!("found {}", actual));
    soft.record(format!("'{}' contains {}", name, expected), passed, detail);
}

pub fn expect_property_truthy(soft: &mut SoftAssertions, obj: &Value, name: &str) {
    let actual = obj.get(name).unwrap_or(&Value::Null);
    let passed = is_truthy(actual);
    let detail = (!passed).then(|| format!("found {}", actual));
    soft.record(format!("'{}' is truthy", name), passed, detail);
}

pub fn expect_property_falsy(soft: &mut SoftAssertions, obj: &Value, name: &str) {
    let actual = obj.get(name).unwrap_or(&Value::Null);
    let passed = !is_truthy(actual);
    let detail = (!passed).then(|| format!("found {}", actual));
    soft.record(format!("'{}' is falsy", name), passed, detail);
}

/// Record a schema validation as one check, keeping every violation in the detail
pub fn expect_schema(
    soft: &mut SoftAssertions,
    api: &ApiHandle,
    response: &ApiResponse,
    schema: ResponseSchema,
) {
    let result = api.schemas.validate_response(response, schema);
    let detail = result.as_ref().err().map(|e| e.to_string());
    soft.record(
        format!("response corresponds to the {} schema", schema),
        result.is_ok(),
        detail,
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}...", cut)
}
