//! Response contract cases

use conduit_client::models::{ArticleQuery, ArticleUpdate, UserUpdate};
use conduit_client::ResponseSchema;

use crate::assertions::{expect_schema, expect_status_code, SoftAssertions};
use crate::runner::TestCase;

const SUITE: &str = "schemas";
const TAGS: &[&str] = &["@schemas"];

pub(super) fn cases() -> Vec<TestCase> {
    vec![
        TestCase::new(SUITE, "CON-061", "Sign up a new user response schema should validate correct data", TAGS, |scope| async move {
            let api = scope.api().await?;
            let user = scope.generator().user();
            let mut soft = SoftAssertions::new("CON-061");

            let response = api.users.sign_up(&user.to_new_user()).await?;

            expect_schema(&mut soft, api, &response, ResponseSchema::User);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-062", "Sign in with existing user response schema should validate correct data", TAGS, |scope| async move {
            let registered = scope.registered_user().await?;
            let mut soft = SoftAssertions::new("CON-062");

            let response = registered.api.users.sign_in(&registered.user.credentials()).await?;

            expect_schema(&mut soft, &registered.api, &response, ResponseSchema::User);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-063", "Update user profile response schema should validate correct data", TAGS, |scope| async move {
            let registered = scope.registered_user().await?;
            let bio = scope.generator().user().bio;
            let mut soft = SoftAssertions::new("CON-063");

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

            expect_schema(&mut soft, &registered.api, &response, ResponseSchema::EditedUser);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-064", "Create new article response schema should validate correct data", TAGS, |scope| async move {
            let registered = scope.registered_user().await?;
            let draft = scope.generator().article().to_draft();
            let mut soft = SoftAssertions::new("CON-064");

            let response = registered.api.articles.create(&draft, Some(&registered.token)).await?;

            expect_schema(&mut soft, &registered.api, &response, ResponseSchema::Article);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-065", "Edit own article response schema should validate correct data", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-065");

            let update = ArticleUpdate::title(format!("Edited {}", created.article.title));
            let response = created
                .api
                .articles
                .edit(&created.article.slug, &update, Some(&created.token))
                .await?;

            expect_schema(&mut soft, &created.api, &response, ResponseSchema::Article);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-066", "Add article to favorites response schema should validate correct data", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let mut soft = SoftAssertions::new("CON-066");

            let response = created
                .api
                .articles
                .favorite(&created.article.slug, Some(&created.token))
                .await?;

            expect_schema(&mut soft, &created.api, &response, ResponseSchema::Article);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-067", "Delete article from favorites response schema should validate correct data", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let slug = created.article.slug.as_str();
            let token = Some(created.token.as_str());
            let mut soft = SoftAssertions::new("CON-067");

            let favorite = created.api.articles.favorite(slug, token).await?;
            expect_status_code(&mut soft, &favorite, 200);
            let response = created.api.articles.unfavorite(slug, token).await?;

            expect_schema(&mut soft, &created.api, &response, ResponseSchema::Article);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-068", "Add comment to article response schema should validate correct data", TAGS, |scope| async move {
            let created = scope.created_article().await?;
            let comment = scope.generator().comment();
            let mut soft = SoftAssertions::new("CON-068");

            let response = created
                .api
                .comments
                .add(&created.article.slug, &comment, Some(&created.token))
                .await?;

            expect_schema(&mut soft, &created.api, &response, ResponseSchema::Comment);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-069", "Get all articles response schema should validate correct data", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-069");

            let response = api.search.list_articles(&ArticleQuery::new()).await?;

            expect_schema(&mut soft, api, &response, ResponseSchema::ArticleList);
            soft.finish()
        }),
        TestCase::new(SUITE, "CON-070", "Get tags response schema should validate correct data", TAGS, |scope| async move {
            let api = scope.api().await?;
            let mut soft = SoftAssertions::new("CON-070");

            let response = api.tags.list().await?;

            expect_schema(&mut soft, api, &response, ResponseSchema::TagList);
            soft.finish()
        }),
    ]
}
