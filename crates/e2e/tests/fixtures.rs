//! Fixture graph tests against a mock Conduit server
//!
//! Verifies memoization (each setup call hits the server once per scope),
//! dependency ordering and failure propagation.

use std::sync::Arc;
use std::time::Duration;

use conduit_client::HttpAccessor;
use conduit_e2e::fixtures::resolution_order;
use conduit_e2e::{DataGenerator, E2eError, FixtureKey, FixtureScope};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

const TOKEN: &str = "jwt.fixture.token";
const SLUG: &str = "how-to-train-your-dragon";

fn scope_for(server: &ServerGuard) -> FixtureScope {
    let http = HttpAccessor::with_timeout(&server.url(), Duration::from_secs(5)).unwrap();
    let generator = DataGenerator::new("Test1234!", "fx01").unwrap();
    FixtureScope::new(http, Arc::new(generator))
}

fn user_body(bio: Option<&str>) -> String {
    json!({
        "user": {
            "username": "jakefx010042",
            "email": "jakefx010042@test-qa-dojo.com",
            "token": TOKEN,
            "bio": bio,
            "image": null
        }
    })
    .to_string()
}

fn article_body() -> String {
    json!({
        "article": {
            "slug": SLUG,
            "title": "How to train your dragon",
            "description": "Ever wonder how?",
            "body": "You have to believe",
            "tagList": ["kos"],
            "createdAt": "2016-02-18T03:22:56.637Z",
            "updatedAt": "2016-02-18T03:48:35.824Z",
            "favorited": false,
            "favoritesCount": 0,
            "author": {
                "username": "jakefx010042",
                "bio": null,
                "image": "https://api.realworld.io/images/smiley-cyrus.jpeg",
                "following": false
            }
        }
    })
    .to_string()
}

async fn mock_sign_up(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("POST", "/api/users")
        .match_body(Matcher::PartialJson(json!({ "user": { "password": "Test1234!" } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_body(None))
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn fixtures_are_computed_once_per_scope() {
    let mut server = Server::new_async().await;
    let sign_up = mock_sign_up(&mut server, 1).await;
    let create = server
        .mock("POST", "/api/articles")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({ "article": { "tagList": ["kos"] } })))
        .with_status(200)
        .with_body(article_body())
        .expect(1)
        .create_async()
        .await;
    let comment = server
        .mock("POST", format!("/api/articles/{}/comments", SLUG).as_str())
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_body(r#"{"comment":{"id":1,"body":"hi","createdAt":"2016-02-18T03:22:56.637Z","author":{"username":"jakefx010042","following":false}}}"#)
        .expect(1)
        .create_async()
        .await;

    let scope = scope_for(&server);

    let with_comment = scope.created_article_with_comment().await.unwrap();
    assert_eq!(with_comment.article.slug, SLUG);
    assert_eq!(with_comment.token, TOKEN);

    // Later requests reuse the cached values
    scope.created_article_with_comment().await.unwrap();
    let article = scope.created_article().await.unwrap();
    let user = scope.registered_user().await.unwrap();
    assert_eq!(article.article.slug, with_comment.article.slug);
    assert_eq!(user.token, TOKEN);
    assert_eq!(article.author.username, user.user.username);

    assert_eq!(
        scope.computed(),
        resolution_order(FixtureKey::CreatedArticleWithComment)
    );

    sign_up.assert_async().await;
    create.assert_async().await;
    comment.assert_async().await;
}

#[tokio::test]
async fn separate_scopes_do_not_share_fixtures() {
    let mut server = Server::new_async().await;
    let sign_up = mock_sign_up(&mut server, 2).await;

    scope_for(&server).registered_user().await.unwrap();
    scope_for(&server).registered_user().await.unwrap();

    sign_up.assert_async().await;
}

#[tokio::test]
async fn edited_profile_merges_new_bio() {
    let mut server = Server::new_async().await;
    let _sign_up = mock_sign_up(&mut server, 1).await;
    let edit = server
        .mock("PUT", "/api/user")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_body(Matcher::Regex(r#""bio":""#.to_string()))
        .with_status(200)
        .with_body(user_body(Some("I like to skateboard")))
        .expect(1)
        .create_async()
        .await;

    let scope = scope_for(&server);
    scope.resolve(FixtureKey::EditedUserProfile).await.unwrap();
    let edited = scope.edited_user_profile().await.unwrap();
    let registered = scope.registered_user().await.unwrap();

    assert!(!edited.user.bio.is_empty());
    assert_eq!(edited.user.username, registered.user.username);
    assert_eq!(edited.profile.bio.as_deref(), Some("I like to skateboard"));
    assert_eq!(scope.computed(), resolution_order(FixtureKey::EditedUserProfile));
    assert_eq!(
        scope.computed(),
        vec![FixtureKey::Api, FixtureKey::RegisteredUser, FixtureKey::EditedUserProfile]
    );
    edit.assert_async().await;
}

#[tokio::test]
async fn article_creation_failure_is_propagated() {
    let mut server = Server::new_async().await;
    let _sign_up = mock_sign_up(&mut server, 1).await;
    let _create = server
        .mock("POST", "/api/articles")
        .with_status(422)
        .with_body(r#"{"errors":{"title":["can't be blank"]}}"#)
        .create_async()
        .await;
    let comment = server
        .mock("POST", Matcher::Regex(r"^/api/articles/.+/comments$".to_string()))
        .expect(0)
        .create_async()
        .await;

    let scope = scope_for(&server);
    let err = scope
        .resolve(FixtureKey::CreatedArticleWithComment)
        .await
        .unwrap_err();

    match err {
        E2eError::FixtureFailed { fixture, expected, actual, body } => {
            assert_eq!(fixture, "createdArticle");
            assert_eq!(expected, 200);
            assert_eq!(actual, 422);
            assert!(body.contains("can't be blank"));
        }
        other => panic!("expected FixtureFailed, got {:?}", other),
    }
    assert_eq!(scope.computed(), vec![FixtureKey::Api, FixtureKey::RegisteredUser]);
    comment.assert_async().await;
}

#[tokio::test]
async fn sign_up_failure_stops_the_chain() {
    let mut server = Server::new_async().await;
    let _sign_up = server
        .mock("POST", "/api/users")
        .with_status(422)
        .with_body(r#"{"errors":{"username":["has already been taken"]}}"#)
        .create_async()
        .await;

    let scope = scope_for(&server);
    let err = scope.created_article().await.unwrap_err();

    assert!(matches!(err, E2eError::FixtureFailed { ref fixture, actual: 422, .. } if fixture == "registeredUser"));
    assert_eq!(scope.computed(), vec![FixtureKey::Api]);
}
