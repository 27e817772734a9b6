//! Wire models for the Conduit API
//!
//! Request payloads are wrapped in a single-key envelope (`{ "user": ... }`,
//! `{ "article": ... }`, `{ "comment": ... }`). Response snapshots are plain
//! data captured from the server and never mutated locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `{ "user": T }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

/// `{ "article": T }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleEnvelope<T> {
    pub article: T,
}

/// `{ "comment": T }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEnvelope<T> {
    pub comment: T,
}

// ─── Users ───

/// Sign-up payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Sign-in payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// Profile edit payload; absent fields are left unchanged by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Authenticated user as returned by sign-up, sign-in and profile calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub token: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Public profile embedded in articles and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub following: bool,
}

// ─── Articles ───

/// Article creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_list: Vec<String>,
}

/// Article edit payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ArticleUpdate {
    /// Edit that only retitles the article
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Article snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub favorited: bool,
    pub favorites_count: u64,
    pub author: Author,
}

/// Paged article listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesPage {
    pub articles: Vec<Article>,
    pub articles_count: u64,
}

/// Filters for the article listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub favorited: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, username: impl Into<String>) -> Self {
        self.author = Some(username.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn favorited(mut self, username: impl Into<String>) -> Self {
        self.favorited = Some(username.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Query string pairs in a stable order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(author) = &self.author {
            pairs.push(("author".to_string(), author.clone()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag".to_string(), tag.clone()));
        }
        if let Some(favorited) = &self.favorited {
            pairs.push(("favorited".to_string(), favorited.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }
}

// ─── Comments ───

/// Comment creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
}

/// Comment snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Servers differ on string vs numeric ids; kept as text either way
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentsList {
    pub comments: Vec<Comment>,
}

// ─── Tags ───

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsList {
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_snapshot_from_wire() {
        let body = json!({
            "article": {
                "slug": "how-to-train-your-dragon",
                "title": "How to train your dragon",
                "description": "Ever wonder how?",
                "body": "It takes a Jacobian",
                "tagList": ["dragons", "training"],
                "createdAt": "2016-02-18T03:22:56.637Z",
                "updatedAt": "2016-02-18T03:48:35.824Z",
                "favorited": false,
                "favoritesCount": 0,
                "author": {
                    "username": "jake",
                    "bio": "I work at statefarm",
                    "image": "https://i.stack.imgur.com/xHWG8.jpg",
                    "following": false
                }
            }
        });

        let envelope: ArticleEnvelope<Article> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.article.slug, "how-to-train-your-dragon");
        assert_eq!(envelope.article.tag_list, vec!["dragons", "training"]);
        assert_eq!(envelope.article.author.username, "jake");
    }

    #[test]
    fn test_user_update_skips_absent_fields() {
        let update = UserUpdate {
            bio: Some("hello".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(UserEnvelope { user: update }).unwrap();
        assert_eq!(value, json!({"user": {"bio": "hello"}}));
    }

    #[test]
    fn test_draft_uses_camel_case_tag_list() {
        let draft = ArticleDraft {
            title: "t".into(),
            description: "d".into(),
            body: "b".into(),
            tag_list: vec!["kos".into()],
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["tagList"], json!(["kos"]));
    }

    #[test]
    fn test_comment_id_accepts_number_or_string() {
        let author = json!({"username": "jake", "following": false});
        let numeric: Comment = serde_json::from_value(json!({
            "id": 42, "body": "hi", "createdAt": "2016-02-18T03:22:56.637Z", "author": author
        }))
        .unwrap();
        let text: Comment = serde_json::from_value(json!({
            "id": "c-42", "createdAt": "2016-02-18T03:22:56.637Z", "author": author
        }))
        .unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(text.id, "c-42");
        assert_eq!(text.body, "");
    }

    #[test]
    fn test_query_pairs_order() {
        let query = ArticleQuery::new().limit(10).author("jake").offset(0).tag("kos");
        let pairs = query.to_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["author", "tag", "limit", "offset"]);
    }
}
