//! Table-driven registration and login rejections

use std::sync::Arc;

use crate::assertions::{expect_status_code, SoftAssertions};
use crate::error::E2eResult;
use crate::runner::TestCase;
use crate::tables::{invalid_logins, invalid_signups};

const SUITE: &str = "params";

pub(super) fn cases() -> E2eResult<Vec<TestCase>> {
    let mut cases = Vec::new();

    for row in invalid_signups()? {
        let id = format!("CON-050-{}", row.id);
        let title = format!("Registration with invalid data: {}", row.test_case);
        let row = Arc::new(row);
        let case_id = id.clone();
        cases.push(TestCase::new(SUITE, &id, &title, &["@params", "@CON-050"], move |scope| {
            let row = row.clone();
            let case_id = case_id.clone();
            async move {
                let api = scope.api().await?;
                let mut soft = SoftAssertions::new(case_id);

                let response = api.users.sign_up(&row.data).await?;

                expect_status_code(&mut soft, &response, row.expected_code);
                soft.finish()
            }
        }));
    }

    for row in invalid_logins()? {
        let id = format!("CON-051-{}", row.id);
        let title = format!("Login with invalid data: {}", row.test_case);
        let row = Arc::new(row);
        let case_id = id.clone();
        cases.push(TestCase::new(SUITE, &id, &title, &["@params", "@CON-051"], move |scope| {
            let row = row.clone();
            let case_id = case_id.clone();
            async move {
                let api = scope.api().await?;
                let mut soft = SoftAssertions::new(case_id);

                let response = api.users.sign_in(&row.credentials).await?;

                expect_status_code(&mut soft, &response, row.expected_code);
                soft.finish()
            }
        }));
    }

    Ok(cases)
}
