//! Scenario catalog
//!
//! Every case carries its `CON-xxx` id, a title and the tags of the group it
//! belongs to. Cases are keyed `<suite>/<id>` because a few ids are shared
//! between suites.

mod articles;
mod comments;
mod params;
mod schemas;
mod search;
mod tags;
mod users;

use conduit_client::models::{User, UserEnvelope};
use conduit_client::ApiHandle;
use serde_json::Value;

use crate::assertions::{expect_status_code, SoftAssertions};
use crate::error::E2eResult;
use crate::generators::DataGenerator;
use crate::runner::TestCase;

/// Every registered case, in suite order
pub fn catalog() -> E2eResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    cases.extend(users::cases());
    cases.extend(articles::cases());
    cases.extend(comments::cases());
    cases.extend(search::cases());
    cases.extend(tags::cases());
    cases.extend(schemas::cases());
    cases.extend(params::cases()?);
    Ok(cases)
}

/// Sign up a second, unrelated user and return its token
async fn sign_up_other_user(
    api: &ApiHandle,
    generator: &DataGenerator,
    soft: &mut SoftAssertions,
) -> E2eResult<String> {
    let other = generator.user();
    let response = api.users.sign_up(&other.to_new_user()).await?;
    expect_status_code(soft, &response, 200);
    let envelope: UserEnvelope<User> = response.json()?;
    Ok(envelope.user.token)
}

/// A slug no article of this run can have
fn missing_slug(generator: &DataGenerator) -> String {
    format!("{}-{}-nonexistent", generator.slug(), generator.run_prefix())
}

/// Comment ids arrive as strings or numbers; anything else is no id
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
