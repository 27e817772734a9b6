//! Fixture graph
//!
//! Each fixture is a named setup step with declared upstream dependencies.
//! A `FixtureScope` belongs to one case; every fixture in it is computed at
//! most once and all consumers share the same instance.
//!
//! ```text
//! Api
//!  └── RegisteredUser
//!       ├── EditedUserProfile
//!       └── CreatedArticle
//!            └── CreatedArticleWithComment
//! ```

use std::fmt;
use std::sync::Arc;

use conduit_client::models::{
    Article, ArticleEnvelope, User, UserEnvelope, UserUpdate,
};
use conduit_client::{ApiHandle, ApiResponse, HttpAccessor};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::error::{E2eError, E2eResult};
use crate::generators::{DataGenerator, RandomUser};

/// Named fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixtureKey {
    Api,
    RegisteredUser,
    EditedUserProfile,
    CreatedArticle,
    CreatedArticleWithComment,
}

impl FixtureKey {
    pub const ALL: [FixtureKey; 5] = [
        FixtureKey::Api,
        FixtureKey::RegisteredUser,
        FixtureKey::EditedUserProfile,
        FixtureKey::CreatedArticle,
        FixtureKey::CreatedArticleWithComment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FixtureKey::Api => "API",
            FixtureKey::RegisteredUser => "registeredUser",
            FixtureKey::EditedUserProfile => "editedUserProfile",
            FixtureKey::CreatedArticle => "createdArticle",
            FixtureKey::CreatedArticleWithComment => "createdArticleWithComment",
        }
    }

    /// Direct upstream fixtures; `FixtureScope::resolve` computes them first
    pub fn dependencies(&self) -> &'static [FixtureKey] {
        match self {
            FixtureKey::Api => &[],
            FixtureKey::RegisteredUser => &[FixtureKey::Api],
            FixtureKey::EditedUserProfile => &[FixtureKey::RegisteredUser],
            FixtureKey::CreatedArticle => &[FixtureKey::RegisteredUser],
            FixtureKey::CreatedArticleWithComment => &[FixtureKey::CreatedArticle],
        }
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order in which `target` and its transitive dependencies are computed
pub fn resolution_order(target: FixtureKey) -> Vec<FixtureKey> {
    fn visit(key: FixtureKey, order: &mut Vec<FixtureKey>) {
        if order.contains(&key) {
            return;
        }
        for dep in key.dependencies() {
            visit(*dep, order);
        }
        order.push(key);
    }

    let mut order = Vec::new();
    visit(target, &mut order);
    order
}

/// A freshly signed-up user
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub api: ApiHandle,
    pub user: RandomUser,
    pub token: String,
    pub profile: User,
}

/// The registered user after a bio edit
#[derive(Debug, Clone)]
pub struct EditedUserProfile {
    pub api: ApiHandle,
    /// Generated data with the new bio merged in
    pub user: RandomUser,
    pub token: String,
    pub profile: User,
}

/// An article owned by the registered user
#[derive(Debug, Clone)]
pub struct CreatedArticle {
    pub api: ApiHandle,
    pub token: String,
    pub author: RandomUser,
    pub article: Article,
}

/// Per-case fixture container
pub struct FixtureScope {
    http: HttpAccessor,
    generator: Arc<DataGenerator>,
    api: OnceCell<ApiHandle>,
    registered_user: OnceCell<RegisteredUser>,
    edited_user_profile: OnceCell<EditedUserProfile>,
    created_article: OnceCell<CreatedArticle>,
    created_article_with_comment: OnceCell<CreatedArticle>,
    computed: Mutex<Vec<FixtureKey>>,
}

impl FixtureScope {
    pub fn new(http: HttpAccessor, generator: Arc<DataGenerator>) -> Self {
        Self {
            http,
            generator,
            api: OnceCell::new(),
            registered_user: OnceCell::new(),
            edited_user_profile: OnceCell::new(),
            created_article: OnceCell::new(),
            created_article_with_comment: OnceCell::new(),
            computed: Mutex::new(Vec::new()),
        }
    }

    pub fn generator(&self) -> &DataGenerator {
        &self.generator
    }

    /// Fixtures computed so far, in computation order
    pub fn computed(&self) -> Vec<FixtureKey> {
        self.computed.lock().clone()
    }

    /// Compute `key` and everything it depends on, one step at a time in
    /// `resolution_order`. Steps already computed in this scope are reused.
    pub async fn resolve(&self, key: FixtureKey) -> E2eResult<()> {
        for step in resolution_order(key) {
            self.resolve_step(step).await?;
        }
        Ok(())
    }

    async fn resolve_step(&self, key: FixtureKey) -> E2eResult<()> {
        match key {
            FixtureKey::Api => self.api().await.map(|_| ()),
            FixtureKey::RegisteredUser => self.registered_user().await.map(|_| ()),
            FixtureKey::EditedUserProfile => self.edited_user_profile().await.map(|_| ()),
            FixtureKey::CreatedArticle => self.created_article().await.map(|_| ()),
            FixtureKey::CreatedArticleWithComment => {
                self.created_article_with_comment().await.map(|_| ())
            }
        }
    }

    pub async fn api(&self) -> E2eResult<&ApiHandle> {
        self.api
            .get_or_try_init(|| async {
                let api = ApiHandle::new(self.http.clone());
                self.mark(FixtureKey::Api);
                Ok(api)
            })
            .await
    }

    pub async fn registered_user(&self) -> E2eResult<&RegisteredUser> {
        self.registered_user
            .get_or_try_init(|| self.compute_registered_user())
            .await
    }

    pub async fn edited_user_profile(&self) -> E2eResult<&EditedUserProfile> {
        self.edited_user_profile
            .get_or_try_init(|| self.compute_edited_user_profile())
            .await
    }

    pub async fn created_article(&self) -> E2eResult<&CreatedArticle> {
        self.created_article
            .get_or_try_init(|| self.compute_created_article())
            .await
    }

    pub async fn created_article_with_comment(&self) -> E2eResult<&CreatedArticle> {
        self.created_article_with_comment
            .get_or_try_init(|| self.compute_created_article_with_comment())
            .await
    }

    async fn compute_registered_user(&self) -> E2eResult<RegisteredUser> {
        let api = self.api().await?.clone();
        let user = self.generator.user();
        debug!("Fixture {}: signing up {}", FixtureKey::RegisteredUser, user.username);

        let response = api.users.sign_up(&user.to_new_user()).await?;
        expect_fixture_status(FixtureKey::RegisteredUser, &response, 200)?;
        let envelope: UserEnvelope<User> = response.json()?;

        self.mark(FixtureKey::RegisteredUser);
        Ok(RegisteredUser {
            api,
            token: envelope.user.token.clone(),
            user,
            profile: envelope.user,
        })
    }

    async fn compute_edited_user_profile(&self) -> E2eResult<EditedUserProfile> {
        let registered = self.registered_user().await?;
        let bio = self.generator.user().bio;
        debug!("Fixture {}: editing bio of {}", FixtureKey::EditedUserProfile, registered.user.username);

        let update = UserUpdate {
            email: Some(registered.user.email.clone()),
            password: Some(registered.user.password.clone()),
            bio: Some(bio.clone()),
            ..Default::default()
        };
        let response = registered
            .api
            .users
            .edit_profile(&update, Some(&registered.token))
            .await?;
        expect_fixture_status(FixtureKey::EditedUserProfile, &response, 200)?;
        let envelope: UserEnvelope<User> = response.json()?;

        let mut user = registered.user.clone();
        user.bio = bio;

        self.mark(FixtureKey::EditedUserProfile);
        Ok(EditedUserProfile {
            api: registered.api.clone(),
            user,
            token: envelope.user.token.clone(),
            profile: envelope.user,
        })
    }

    async fn compute_created_article(&self) -> E2eResult<CreatedArticle> {
        let registered = self.registered_user().await?;
        let draft = self.generator.article().to_draft();
        debug!("Fixture {}: creating '{}'", FixtureKey::CreatedArticle, draft.title);

        let response = registered
            .api
            .articles
            .create(&draft, Some(&registered.token))
            .await?;
        expect_fixture_status(FixtureKey::CreatedArticle, &response, 200)?;
        let envelope: ArticleEnvelope<Article> = response.json()?;

        self.mark(FixtureKey::CreatedArticle);
        Ok(CreatedArticle {
            api: registered.api.clone(),
            token: registered.token.clone(),
            author: registered.user.clone(),
            article: envelope.article,
        })
    }

    async fn compute_created_article_with_comment(&self) -> E2eResult<CreatedArticle> {
        let created = self.created_article().await?;
        let comment = self.generator.comment();
        debug!(
            "Fixture {}: commenting on {}",
            FixtureKey::CreatedArticleWithComment,
            created.article.slug
        );

        let response = created
            .api
            .comments
            .add(&created.article.slug, &comment, Some(&created.token))
            .await?;
        expect_fixture_status(FixtureKey::CreatedArticleWithComment, &response, 200)?;

        self.mark(FixtureKey::CreatedArticleWithComment);
        Ok(created.clone())
    }

    fn mark(&self, key: FixtureKey) {
        self.computed.lock().push(key);
    }
}

fn expect_fixture_status(fixture: FixtureKey, response: &ApiResponse, expected: u16) -> E2eResult<()> {
    if response.status() == expected {
        return Ok(());
    }

    let err = E2eError::FixtureFailed {
        fixture: fixture.name().to_string(),
        expected,
        actual: response.status(),
        body: response.text(),
    };
    error!("{}", err);
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order_visits_dependencies_first() {
        assert_eq!(resolution_order(FixtureKey::Api), vec![FixtureKey::Api]);
        assert_eq!(
            resolution_order(FixtureKey::CreatedArticleWithComment),
            vec![
                FixtureKey::Api,
                FixtureKey::RegisteredUser,
                FixtureKey::CreatedArticle,
                FixtureKey::CreatedArticleWithComment,
            ]
        );
        assert_eq!(
            resolution_order(FixtureKey::EditedUserProfile),
            vec![FixtureKey::Api, FixtureKey::RegisteredUser, FixtureKey::EditedUserProfile]
        );
    }

    #[test]
    fn test_every_order_is_duplicate_free() {
        for key in FixtureKey::ALL {
            let order = resolution_order(key);
            let mut deduped = order.clone();
            deduped.dedup();
            assert_eq!(order, deduped);
            assert_eq!(order.last(), Some(&key));
        }
    }

    #[test]
    fn test_dependencies_are_declared_before_dependents() {
        for key in FixtureKey::ALL {
            let order = resolution_order(key);
            for (position, step) in order.iter().enumerate() {
                for dep in step.dependencies() {
                    let dep_position = order.iter().position(|k| k == dep);
                    assert!(dep_position.is_some_and(|p| p < position), "{} before {}", dep, step);
                }
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(FixtureKey::Api.to_string(), "API");
        assert_eq!(FixtureKey::CreatedArticle.name(), "createdArticle");
    }

    #[test]
    fn test_status_mismatch_becomes_fixture_error() {
        let response = ApiResponse::new(422, r#"{"errors":{"title":["can't be blank"]}}"#);
        match expect_fixture_status(FixtureKey::CreatedArticle, &response, 200) {
            Err(E2eError::FixtureFailed { fixture, expected, actual, body }) => {
                assert_eq!(fixture, "createdArticle");
                assert_eq!(expected, 200);
                assert_eq!(actual, 422);
                assert!(body.contains("can't be blank"));
            }
            other => panic!("expected FixtureFailed, got {:?}", other),
        }
        expect_fixture_status(FixtureKey::Api, &ApiResponse::new(200, ""), 200).unwrap();
    }
}
