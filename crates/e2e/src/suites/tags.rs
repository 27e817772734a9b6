//! Tag cases

use conduit_client::models::ArticleQuery;

use crate::assertions::{
    expect_has_property, expect_property_contains, expect_property_truthy, expect_status_code,
    SoftAssertions,
};
use crate::generators::ARTICLE_TAG;
use crate::runner::TestCase;

const SUITE: &str = "tags";
const TAGS: &[&str] = &["@tags"];

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-044", "Get tags", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-044");

            let response = api.tags.list().await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "tags");
            expect_property_contains(&mut soft, &body, "tags", ARTICLE_TAG);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-045", "Get articles by tag and author", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let tag = created.article.tag_list.first().cloned().unwrap_or_default();
            let mut soft = SoftAssertions::new("CON-045");

            let query = ArticleQuery::new()
                .tag(tag.clone())
                .author(created.article.author.username.clone());
            let response = created.api.search.list_articles(&query).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body, "articles");
            for article in body["articles"].as_array().into_iter().flatten() {
                expect_property_contains(&mut soft, article, "tagList", tag.as_str());
            }
            expect_has_property(&mut soft, &body, "articlesCount");
            expect_property_truthy(&mut soft, &body, "articlesCount");
            soft.finish()
        }),
    ]
}
