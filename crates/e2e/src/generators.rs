//! Random data generators for users, articles and comments
//!
//! Every generated username carries the run prefix so entities from
//! concurrent runs against the same API do not collide.

use conduit_client::models::{ArticleDraft, LoginUser, NewComment, NewUser};
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use fake::faker::name::en::FirstName;
use fake::Fake;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::E2eConfig;
use crate::error::{E2eError, E2eResult};

/// Domain every generated email lives under
pub const EMAIL_DOMAIN: &str = "test-qa-dojo.com";

/// The single tag put on every generated article
pub const ARTICLE_TAG: &str = "kos";

/// A generated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomUser {
    pub first_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: String,
}

impl RandomUser {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn credentials(&self) -> LoginUser {
        LoginUser {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// A generated article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomArticle {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub slug: Option<String>,
}

impl RandomArticle {
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            body: self.body.clone(),
            tag_list: self.tag_list.clone(),
        }
    }
}

/// Produces synthetic entities for one run
#[derive(Debug, Clone)]
pub struct DataGenerator {
    password: String,
    run_prefix: String,
}

impl DataGenerator {
    /// Create a generator; rejects settings that would make every sign-up fail
    pub fn new(password: impl Into<String>, run_prefix: impl Into<String>) -> E2eResult<Self> {
        let password = password.into();
        let run_prefix = run_prefix.into().to_lowercase();

        if password.is_empty() {
            let err = E2eError::DataGeneration("new user password is empty".to_string());
            error!("Error generating random user: {}", err);
            return Err(err);
        }
        if !run_prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            let err = E2eError::DataGeneration(format!(
                "run prefix '{}' must be ASCII letters and digits",
                run_prefix
            ));
            error!("Error generating random user: {}", err);
            return Err(err);
        }

        Ok(Self { password, run_prefix })
    }

    pub fn from_config(config: &E2eConfig) -> E2eResult<Self> {
        Self::new(config.new_user_password.clone(), config.run_prefix.clone())
    }

    pub fn run_prefix(&self) -> &str {
        &self.run_prefix
    }

    pub fn user(&self) -> RandomUser {
        self.user_with_rng(&mut rand::thread_rng())
    }

    pub fn user_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> RandomUser {
        let first_name: String = FirstName().fake_with_rng(rng);
        let mut stem: String = first_name
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_lowercase();
        if stem.len() < 3 {
            stem.push_str("user");
        }

        let username = format!("{}{}{:04}", stem, self.run_prefix, rng.gen_range(0..10_000));
        let email = format!("{}@{}", username, EMAIL_DOMAIN);
        let bio: String = Sentence(6..12).fake_with_rng(rng);

        RandomUser {
            first_name,
            username,
            email,
            password: self.password.clone(),
            bio,
        }
    }

    pub fn article(&self) -> RandomArticle {
        self.article_with_rng(&mut rand::thread_rng(), false)
    }

    /// Article that also carries a random three-word slug
    pub fn article_with_slug(&self) -> RandomArticle {
        self.article_with_rng(&mut rand::thread_rng(), true)
    }

    pub fn article_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, with_slug: bool) -> RandomArticle {
        let words: Vec<String> = Words(3..8).fake_with_rng(rng);
        let slug = with_slug.then(|| self.slug_with_rng(rng));

        RandomArticle {
            title: words.join(" "),
            description: Sentence(4..10).fake_with_rng(rng),
            body: Paragraph(2..5).fake_with_rng(rng),
            tag_list: vec![ARTICLE_TAG.to_string()],
            slug,
        }
    }

    /// Three random words joined by dashes
    pub fn slug(&self) -> String {
        self.slug_with_rng(&mut rand::thread_rng())
    }

    pub fn slug_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let parts: Vec<String> = Words(3..4).fake_with_rng(rng);
        parts.join("-").to_lowercase()
    }

    pub fn comment(&self) -> NewComment {
        self.comment_with_rng(&mut rand::thread_rng())
    }

    pub fn comment_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> NewComment {
        NewComment {
            body: Sentence(4..10).fake_with_rng(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> DataGenerator {
        DataGenerator::new("Test1234!", "ab12").unwrap()
    }

    #[test]
    fn test_user_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let user = generator().user_with_rng(&mut rng);

        assert!(user.username.contains("ab12"));
        assert!(user.username.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(user.username.len() >= 3 + 4 + 4);
        assert_eq!(user.email, format!("{}@{}", user.username, EMAIL_DOMAIN));
        assert_eq!(user.email, user.email.to_lowercase());
        assert_eq!(user.password, "Test1234!");
        assert!(!user.bio.is_empty());
        assert_eq!(user.to_new_user().username, user.username);
        assert_eq!(user.credentials().email, user.email);
    }

    #[test]
    fn test_same_seed_same_user() {
        let a = generator().user_with_rng(&mut StdRng::seed_from_u64(1));
        let b = generator().user_with_rng(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_article_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let article = generator().article_with_rng(&mut rng, false);

        let words = article.title.split_whitespace().count();
        assert!((3..=7).contains(&words), "title has {} words", words);
        assert!(!article.description.is_empty());
        assert!(!article.body.is_empty());
        assert_eq!(article.tag_list, vec![ARTICLE_TAG]);
        assert!(article.slug.is_none());
        assert_eq!(article.to_draft().title, article.title);
    }

    #[test]
    fn test_article_with_slug() {
        let mut rng = StdRng::seed_from_u64(11);
        let article = generator().article_with_rng(&mut rng, true);
        let slug = article.slug.unwrap();
        assert_eq!(slug.split('-').count(), 3);
    }

    #[test]
    fn test_comment_not_empty() {
        assert!(!generator().comment().body.is_empty());
    }

    #[test]
    fn test_bad_settings_are_signaled() {
        assert!(matches!(
            DataGenerator::new("", "ab"),
            Err(E2eError::DataGeneration(_))
        ));
        assert!(matches!(
            DataGenerator::new("pw", "run-1"),
            Err(E2eError::DataGeneration(_))
        ));
        assert_eq!(DataGenerator::new("pw", "AB").unwrap().run_prefix(), "ab");
    }
}
