//! Sign-up, sign-in and profile cases

use conduit_client::models::{LoginUser, NewUser, UserUpdate};

use crate::assertions::{expect_has_property, expect_status_code, SoftAssertions};
use crate::runner::TestCase;

const SUITE: &str = "users";

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-001", "Sign up a new user", &["@signup"], |scope| async move {
            let api = scope.api().await?;
            let user = scope.generator().user();
            let mut soft = SoftAssertions::new("CON-001");

            let response = api.users.sign_up(&user.to_new_user()).await?;

            expect_status_code(&mut soft, &response, 200);
            expect_has_property(&mut soft, &response.json_lossy()["user"], "token");
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-002", "Sign up with existing user email", &["@signup"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-002");

            let response = registered
                .api
                .users
                .sign_up(&NewUser {
                    username: format!("new{}", registered.user.username),
                    email: registered.user.email.clone(),
                    password: registered.user.password.clone(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-003", "Sign up with existing user name", &["@signup"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-003");

            let response = registered
                .api
                .users
                .sign_up(&NewUser {
                    username: registered.user.username.clone(),
                    email: format!("new{}", registered.user.email),
                    password: registered.user.password.clone(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-004", "Sign up with invalid email format", &["@signup"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-004");

            let response = registered
                .api
                .users
                .sign_up(&NewUser {
                    username: registered.user.username.clone(),
                    email: "new.user.email".to_string(),
                    password: registered.user.password.clone(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-005", "Sign up with empty required fields", &["@signup"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-005");

            let response = registered
                .api
                .users
                .sign_up(&NewUser {
                    username: String::new(),
                    email: String::new(),
                    password: String::new(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-006", "Sign in with existing user", &["@signin"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-006");

            let response = registered.api.users.sign_in(&registered.user.credentials()).await?;

            expect_status_code(&mut soft, &response, 200);
            expect_has_property(&mut soft, &response.json_lossy()["user"], "token");
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-007", "Sign in with wrong password", &["@signin"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-007");

            let response = registered
                .api
                .users
                .sign_in(&LoginUser {
                    email: registered.user.email.clone(),
                    password: "wrongPassword123".to_string(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-008", "Sign in with not existing email", &["@signin"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-008");

            let response = registered
                .api
                .users
                .sign_in(&LoginUser {
                    email: "wrong.email.123".to_string(),
                    password: registered.user.password.clone(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-009", "Sign in with empty required fields", &["@signin"], |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-009");

            let response = registered
                .api
                .users
                .sign_in(&LoginUser {
                    email: String::new(),
                    password: String::new(),
                })
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-010", "Update user profile", &["@editProfile"], |scope| async move {
            let registered = scope.registered_user().await?;
            let bio = scope.generator().user().bio;
            let mut soft = SoftAssertions::new("CON-010");

            let update = UserUpdate {
                email: Some(registered.user.email.clone()),
                password: Some(registered.user.password.clone()),
                bio: Some(bio),
                ..Default::default()
            };
            let response = registered
                .api
                .users
                .edit_profile(&update, Some(&registered.token))
                .await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body["user"], "token");
            expect_has_property(&mut soft, &body["user"], "bio");
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-011", "Update user profile without token", &["@editProfile"], |scope| async move {
            let registered = scope.registered_user().await?;
            let bio = scope.generator().user().bio;
            let mut soft = SoftAssertions::new("CON-011");

            let update = UserUpdate {
                email: Some(registered.user.email.clone()),
                password: Some(registered.user.password.clone()),
                bio: Some(bio),
                ..Default::default()
            };
            let response = registered.api.users.edit_profile(&update, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-012", "Get user profile", &["@editProfile"], |scope| async move {
            let edited = scope.edited_user_profile().await?;
            let mut soft = SoftAssertions::new("CON-012");

            let response = edited.api.users.get_profile(Some(&edited.token)).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            for property in ["token", "username", "email", "bio"] {
                expect_has_property(&mut soft, &body["user"], property);
            }
            soft.finish()
        }),
    ]
}
