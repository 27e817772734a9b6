//! Comment cases

use conduit_client::models::NewComment;
use serde_json::Value;

use super::{id_text, missing_slug, sign_up_other_user};
use crate::assertions::{
    expect_has_property, expect_property_equals, expect_status_code, SoftAssertions,
};
use crate::error::{E2eError, E2eResult};
use crate::fixtures::CreatedArticle;
use crate::runner::TestCase;

const SUITE: &str = "comments";
const TAGS: &[&str] = &["@comments"];

pub(super) fn cases() -> Vec<TestCase> {
    let mut cases = add_cases();
    cases.extend(get_cases());
    cases.extend(delete_cases());
    cases
}

/// Id of the first comment on the article, as listed by the API
async fn first_comment_id(created: &CreatedArticle) -> E2eResult<String> {
    let response = created.api.comments.list(&created.article.slug).await?;
    first_listed_id(&response.json_lossy()).ok_or_else(|| {
        E2eError::Precondition(format!(
            "no comment id listed for {} (HTTP {}): {}",
            created.article.slug,
            response.status(),
            response.text()
        ))
    })
}

fn first_listed_id(body: &Value) -> Option<String> {
    id_text(&body["comments"][0]["id"])
}

fn add_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-036", "Add comment to article", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let comment = scope.generator().comment();
            let mut soft = SoftAssertions::new("CON-036");

            let response = created
                .api
                .comments
                .add(&created.article.slug, &comment, Some(&created.token))
                .await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "comment");
            for property in ["id", "createdAt", "author"] {
                expect_has_property(&mut soft, &body["comment"], property);
            }
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-037", "Add comment to article without auth token", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let comment = scope.generator().comment();
            let mut soft = SoftAssertions::new("CON-037");

            let response = created.api.comments.add(&created.article.slug, &comment, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-038", "Add comment to article with empty comment body", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-038");

            let comment = NewComment { body: String::new() };
            let response = created
                .api
                .comments
                .add(&created.article.slug, &comment, Some(&created.token))
                .await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
    ]
}

fn get_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-039", "Get comments for article", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let comment = scope.generator().comment();
            let mut soft = SoftAssertions::new("CON-039");

            let added = created
                .api
                .comments
                .add(&created.article.slug, &comment, Some(&created.token))
                .await?;
            expect_status_code(&mut soft, &added, 200);

            let response = created.api.comments.list(&created.article.slug).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "comments");
            expect_property_equals(&mut soft, &body, "comments", 1);
            for property in ["id", "createdAt", "author"] {
                expect_has_property(&mut soft, &body["comments"][0], property);
            }
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-040", "Get comments for non existent article", TAGS, |scope| async move {
            let api = scope.registered_user().await?.api.clone();
            let slug = missing_slug(scope.generator());
            let mut soft = SoftAssertions::new("CON-040");

            let response = api.comments.list(&slug).await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
    ]
}

fn delete_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-041", "Delete comment by id for own article", TAGS, |scope| async move {
            let created = scope.created_article_with_comment().await?;
            let slug = &created.article.slug;
            let mut soft = SoftAssertions::new("CON-041");

            let comment_id = first_comment_id(created).await?;
            let response = created
                .api
                .comments
                .delete(slug, &comment_id, Some(&created.token))
                .await?;
            expect_status_code(&mut soft, &response, 204);

            let remaining = created.api.comments.list(slug).await?;
            expect_property_equals(&mut soft, &remaining.json_lossy(), "comments", 0);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-042", "Delete comment by id for article of another user", TAGS, |scope| async move {
            let created = scope.created_article_with_comment().await?;
            let mut soft = SoftAssertions::new("CON-042");
            let other_token = sign_up_other_user(&created.api, scope.generator(), &mut soft).await?;

            let comment_id = first_comment_id(created).await?;
            let response = created
                .api
                .comments
                .delete(&created.article.slug, &comment_id, Some(&other_token))
                .await?;

            expect_status_code(&mut soft, &response, 403);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-043", "Delete comment by id for own article without auth", TAGS, |scope| async move {
            let created = scope.created_article_with_comment().await?;
            let mut soft = SoftAssertions::new("CON-043");

            let comment_id = first_comment_id(created).await?;
            let response = created
                .api
                .comments
                .delete(&created.article.slug, &comment_id, None)
                .await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-044", "Delete not existing comment for own article", TAGS, |scope| async move {
            let created = scope.created_article_with_comment().await?;
            let mut soft = SoftAssertions::new("CON-044");

            let response = created
                .api
                .comments
                .delete(&created.article.slug, "8comment8Id8", Some(&created.token))
                .await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_listed_id() {
        let listed = json!({"comments": [{"id": 42}, {"id": 43}]});
        assert_eq!(first_listed_id(&listed).as_deref(), Some("42"));

        assert_eq!(first_listed_id(&json!({"comments": []})), None);
        assert_eq!(first_listed_id(&json!(null)), None);
    }
}
