//! Article listing and lookup cases

use conduit_client::models::ArticleQuery;
use serde_json::Value;

use crate::assertions::{
    expect_has_property, expect_property_contains, expect_property_equals,
    expect_property_truthy, expect_status_code, SoftAssertions,
};
use crate::runner::TestCase;

const SUITE: &str = "search";

pub(super) fn cases() -> Vec<TestCase> {
    let mut cases = listing_cases();
    cases.extend(author_cases());
    cases.extend(slug_cases());
    cases.extend(tag_cases());
    cases
}

fn articles(body: &Value) -> &[Value] {
    body["articles"].as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn listing_cases() -> Vec<TestCase> {
    const TAGS: &[&str] = &["@search"];

    vec![
        TestCase::new(SUITE, "CON-021", "Get all articles", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-021");

            let response = api.search.list_articles(&ArticleQuery::new()).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            expect_has_property(&mut soft, &body, "articlesCount");
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-022", "Get articles with pagination", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-022");

            let query = ArticleQuery::new().limit(10).offset(0);
            let response = api.search.list_articles(&query).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            expect_has_property(&mut soft, &body, "articlesCount");
            expect_property_equals(&mut soft, &body, "articles", 10);
            expect_property_truthy(&mut soft, &body, "articlesCount");
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-025", "Get articles by favorited", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-025");

            let favorite = created
                .api
                .articles
                .favorite(&created.article.slug, Some(&created.token))
                .await?;
            expect_status_code(&mut soft, &favorite, 200);
            let query = ArticleQuery::new().favorited(created.article.author.username.clone());
            let response = created.api.search.list_articles(&query).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            expect_property_equals(&mut soft, &body, "articlesCount", 1);
            expect_property_equals(&mut soft, &body, "articles", 1);
            expect_property_equals(&mut soft, &body["articles"][0], "favoritesCount", 1);
            expect_property_truthy(&mut soft, &body["articles"][0], "favorited");
            soft.finish()
        }),
    ]
}

fn author_cases() -> Vec<TestCase> {
    const TAGS: &[&str] = &["@search", "@author"];

    vec![
        TestCase::new(SUITE, "CON-023", "Get articles by author", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-023");

            let query = ArticleQuery::new().author(created.article.author.username.clone());
            let response = created.api.search.list_articles(&query).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            expect_has_property(&mut soft, &body, "articlesCount");
            expect_property_equals(&mut soft, &body, "articles", 1);
            expect_property_equals(&mut soft, &body, "articlesCount", 1);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-030", "Get articles by non existent author", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-030");

            let query = ArticleQuery::new().author("nonexistentauthor");
            let response = api.search.list_articles(&query).await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
    ]
}

fn slug_cases() -> Vec<TestCase> {
    const TAGS: &[&str] = &["@search", "@slug"];

    vec![
        TestCase::new(SUITE, "CON-026", "Get articles by slug", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let slug = created.article.slug.as_str();
            let mut soft = SoftAssertions::new("CON-026");

            let response = created.api.search.get_article(slug).await?;

            expect_status_code(&mut soft, &response, 200);
            expect_property_equals(&mut soft, &response.json_lossy()["article"], "slug", slug);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-027", "Get articles by non existent slug", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-027");

            let slug = format!("{}-nonexistent", created.article.slug);
            let response = created.api.search.get_article(&slug).await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
    ]
}

fn tag_cases() -> Vec<TestCase> {
    const TAGS: &[&str] = &["@search", "@tag"];

    vec![
        TestCase::new(SUITE, "CON-028", "Get articles by tag", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let tag = created.article.tag_list.first().cloned().unwrap_or_default();
            let mut soft = SoftAssertions::new("CON-028");

            let response = created.api.search.list_articles(&ArticleQuery::new().tag(tag.clone())).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            for article in articles(&body) {
                expect_property_contains(&mut soft, article, "tagList", tag.as_str());
            }
            expect_has_property(&mut soft, &body, "articlesCount");
            expect_property_truthy(&mut soft, &body, "articlesCount");
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-029", "Get articles by not existent tag", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-029");

            let response = api.search.list_articles(&ArticleQuery::new().tag("non-existent-tag")).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            expect_has_property(&mut soft, &body, "articlesCount");
            expect_property_equals(&mut soft, &body, "articlesCount", 0);
            soft.finish()
        }),
    ]
}
