//! Create, edit, delete and favorite cases

use conduit_client::models::{ArticleDraft, ArticleUpdate};

use super::{missing_slug, sign_up_other_user};
use crate::assertions::{
    expect_has_property, expect_property_equals, expect_property_falsy, expect_property_truthy,
    expect_status_code, SoftAssertions,
};
use crate::runner::TestCase;

const SUITE: &str = "articles";

/// Properties every article body must carry
const ARTICLE_PROPERTIES: [&str; 10] = [
    "slug",
    "title",
    "description",
    "body",
    "createdAt",
    "updatedAt",
    "tagList",
    "favorited",
    "favoritesCount",
    "author",
];

pub(super) fn cases() -> Vec<TestCase> {
    let mut cases = create_cases();
    cases.extend(edit_cases());
    cases.extend(delete_cases());
    cases.extend(favorite_cases());
    cases
}

fn untagged_draft(title: String, description: String, body: String) -> ArticleDraft {
    ArticleDraft {
        title,
        description,
        body,
        tag_list: Vec::new(),
    }
}

fn create_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-013", "Create new article", &["@createArticle"], |scope| async move {
            let registered = scope.registered_user().await?;
            let article = scope.generator().article();
            let mut soft = SoftAssertions::new("CON-013");

            let draft = untagged_draft(article.title, article.description, article.body);
            let response = registered.api.articles.create(&draft, Some(&registered.token)).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            for property in ARTICLE_PROPERTIES {
                expect_has_property(&mut soft, &body["article"], property);
            }
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-014", "Create new article without token", &["@createArticle"], |scope| async move {
            let registered = scope.registered_user().await?;
            let article = scope.generator().article();
            let mut soft = SoftAssertions::new("CON-014");

            let draft = untagged_draft(article.title, article.description, article.body);
            let response = registered.api.articles.create(&draft, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-015", "Create new article with empty title", &["@createArticle"], |scope| async move {
            let registered = scope.registered_user().await?;
            let article = scope.generator().article();
            let mut soft = SoftAssertions::new("CON-015");

            let draft = untagged_draft(String::new(), article.description, article.body);
            let response = registered.api.articles.create(&draft, Some(&registered.token)).await?;

            expect_status_code(&mut soft, &response, 422);
            soft.finish()
        }),
    ]
}

fn edit_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-016", "Edit own article", &["@editArticle"], |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-016");

            let update = ArticleUpdate {
                title: Some(format!("Edited {}", created.article.title)),
                description: Some(created.article.description.clone()),
                body: Some(created.article.body.clone()),
            };
            let response = created
                .api
                .articles
                .edit(&created.article.slug, &update, Some(&created.token))
                .await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            for property in ARTICLE_PROPERTIES {
                expect_has_property(&mut soft, &body["article"], property);
            }
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-017", "Edit article of another user", &["@editArticle"], |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-017");
            let other_token = sign_up_other_user(&created.api, scope.generator(), &mut soft).await?;

            let update = ArticleUpdate::title(format!("Edited {}", created.article.title));
            let response = created
                .api
                .articles
                .edit(&created.article.slug, &update, Some(&other_token))
                .await?;

            expect_status_code(&mut soft, &response, 403);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-018", "Edit not existing article", &["@editArticle"], |scope| async move {
            let registered = scope.registered_user().await?;
            let article = scope.generator().article();
            let slug = missing_slug(scope.generator());
            let mut soft = SoftAssertions::new("CON-018");

            let update = ArticleUpdate::title(format!("Edited {}", article.title));
            let response = registered
                .api
                .articles
                .edit(&slug, &update, Some(&registered.token))
                .await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-046", "Edit article without token", &["@editArticle"], |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-046");

            let update = ArticleUpdate::title(format!("Edited {}", created.article.title));
            let response = created.api.articles.edit(&created.article.slug, &update, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
    ]
}

fn delete_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-019", "Delete own article", &["@deleteArticle"], |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-019");

            let response = created
                .api
                .articles
                .delete(&created.article.slug, Some(&created.token))
                .await?;

            expect_status_code(&mut soft, &response, 204);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-020", "Delete article of another user", &["@deleteArticle"], |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-020");
            let other_token = sign_up_other_user(&created.api, scope.generator(), &mut soft).await?;

            let response = created
                .api
                .articles
                .delete(&created.article.slug, Some(&other_token))
                .await?;

            expect_status_code(&mut soft, &response, 403);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-021", "Delete not existing article", &["@deleteArticle"], |scope| async move {
            let registered = scope.registered_user().await?;
            let slug = missing_slug(scope.generator());
            let mut soft = SoftAssertions::new("CON-021");

            let response = registered.api.articles.delete(&slug, Some(&registered.token)).await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-047", "Delete article without token", &["@deleteArticle"], |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-047");

            let response = created.api.articles.delete(&created.article.slug, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
    ]
}

fn favorite_cases() -> Vec<TestCase> {
    const TAGS: &[&str] = &["@addArticleToFavorites"];

    vec![
        TestCase::new(SUITE, "CON-024", "Add article to favorites", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-024");

            let response = created
                .api
                .articles
                .favorite(&created.article.slug, Some(&created.token))
                .await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body["article"], "favoritesCount");
            expect_property_truthy(&mut soft, &body["article"], "favorited");
            expect_property_equals(&mut soft, &body["article"], "favoritesCount", 1);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-031", "Add article to favorites without auth token", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-031");

            let response = created.api.articles.favorite(&created.article.slug, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-032", "Add non existent article to favorites", TAGS, |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-032");

            let response = registered
                .api
                .articles
                .favorite("non-existent-slug", Some(&registered.token))
                .await?;

            expect_status_code(&mut soft, &response, 404);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-033", "Delete article from favorites", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let slug = &created.article.slug;
            let token = Some(created.token.as_str());
            let mut soft = SoftAssertions::new("CON-033");

            let favorited = created.api.articles.favorite(slug, token).await?;
            expect_status_code(&mut soft, &favorited, 200);

            let response = created.api.articles.unfavorite(slug, token).await?;

            expect_status_code(&mut soft, &response, 200);
            let body = response.json_lossy();
            expect_has_property(&mut soft, &body["article"], "favoritesCount");
            expect_property_falsy(&mut soft, &body["article"], "favorited");
            expect_property_equals(&mut soft, &body["article"], "favoritesCount", 0);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-034", "Delete article from favorites without auth token", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-034");

            let favorited = created
                .api
                .articles
                .favorite(&created.article.slug, Some(&created.token))
                .await?;
            expect_status_code(&mut soft, &favorited, 200);

            let response = created.api.articles.unfavorite(&created.article.slug, None).await?;

            expect_status_code(&mut soft, &response, 401);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-035", "Repeat adding same article to favorites", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let slug = &created.article.slug;
            let token = Some(created.token.as_str());
            let mut soft = SoftAssertions::new("CON-035");

            let first = created.api.articles.favorite(slug, token).await?;
            let second = created.api.articles.favorite(slug, token).await?;

            for response in [&first, &second] {
                expect_status_code(&mut soft, response, 200);
                let body = response.json_lossy();
                expect_has_property(&mut soft, &body["article"], "favoritesCount");
                expect_property_truthy(&mut soft, &body["article"], "favorited");
                expect_property_equals(&mut soft, &body["article"], "favoritesCount", 1);
            }
            soft.finish()
        }),
    ]
}
