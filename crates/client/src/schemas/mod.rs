//! Response contracts
//!
//! Each variant is a JSON Schema (draft 7) for one endpoint response. The
//! definitions are built on demand and never mutated. Every object is closed
//! (unknown properties are violations) and every string must be non-empty.

use serde_json::{json, Value};

/// A declared response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSchema {
    /// Sign-up and sign-in: `{ user: { username, email, token } }`
    User,
    /// Profile edit and read: user plus optional `image` and `bio`
    EditedUser,
    /// Create, edit, favorite, unfavorite, get by slug: `{ article }`
    Article,
    /// Article listing: `{ articles, articlesCount }`
    ArticleList,
    /// Add comment: `{ comment: { id, createdAt, author } }`
    Comment,
    /// Comment listing: `{ comments }`
    CommentList,
    /// Tag listing: `{ tags }`
    TagList,
}

impl ResponseSchema {
    pub const ALL: [ResponseSchema; 7] = [
        ResponseSchema::User,
        ResponseSchema::EditedUser,
        ResponseSchema::Article,
        ResponseSchema::ArticleList,
        ResponseSchema::Comment,
        ResponseSchema::CommentList,
        ResponseSchema::TagList,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResponseSchema::User => "user",
            ResponseSchema::EditedUser => "edited-user",
            ResponseSchema::Article => "article",
            ResponseSchema::ArticleList => "article-list",
            ResponseSchema::Comment => "comment",
            ResponseSchema::CommentList => "comment-list",
            ResponseSchema::TagList => "tag-list",
        }
    }

    /// The JSON Schema document for this response
    pub fn definition(&self) -> Value {
        let body = match self {
            ResponseSchema::User => envelope("user", user()),
            ResponseSchema::EditedUser => envelope("user", edited_user()),
            ResponseSchema::Article => envelope("article", article()),
            ResponseSchema::ArticleList => object(
                &["articles", "articlesCount"],
                json!({
                    "articles": { "type": "array", "items": article() },
                    "articlesCount": { "type": "integer" }
                }),
            ),
            ResponseSchema::Comment => envelope("comment", comment()),
            ResponseSchema::CommentList => object(
                &["comments"],
                json!({ "comments": { "type": "array", "items": comment() } }),
            ),
            ResponseSchema::TagList => object(
                &["tags"],
                json!({ "tags": { "type": "array", "items": string(None) } }),
            ),
        };

        let mut document = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": self.name(),
        });
        if let (Some(doc), Some(body)) = (document.as_object_mut(), body.as_object()) {
            doc.extend(body.clone());
        }
        document
    }
}

impl std::fmt::Display for ResponseSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed object: every listed property is known, anything else is a violation
fn object(required: &[&str], properties: Value) -> Value {
    json!({
        "type": "object",
        "required": required,
        "properties": properties,
        "additionalProperties": false
    })
}

/// Non-empty string, optionally with a `format`
fn string(format: Option<&str>) -> Value {
    match format {
        Some(format) => json!({ "type": "string", "minLength": 1, "format": format }),
        None => json!({ "type": "string", "minLength": 1 }),
    }
}

fn envelope(key: &str, inner: Value) -> Value {
    object(&[key], json!({ key: inner }))
}

fn author() -> Value {
    object(
        &["username", "image", "following"],
        json!({
            "username": string(None),
            "image": string(Some("uri")),
            "following": { "type": "boolean" }
        }),
    )
}

fn user() -> Value {
    object(
        &["username", "email", "token"],
        json!({
            "username": string(None),
            "email": string(Some("email")),
            "token": string(None)
        }),
    )
}

fn edited_user() -> Value {
    object(
        &["username", "email", "token"],
        json!({
            "username": string(None),
            "email": string(Some("email")),
            "token": string(None),
            "image": string(Some("uri")),
            "bio": string(None)
        }),
    )
}

fn article() -> Value {
    object(
        &[
            "slug", "title", "description", "body", "createdAt", "updatedAt", "tagList",
            "favorited", "favoritesCount", "author",
        ],
        json!({
            "slug": string(None),
            "title": string(None),
            "description": string(None),
            "body": string(None),
            "createdAt": string(Some("date-time")),
            "updatedAt": string(Some("date-time")),
            "tagList": { "type": "array", "items": string(None) },
            "favorited": { "type": "boolean" },
            "favoritesCount": { "type": "integer" },
            "author": author()
        }),
    )
}

fn comment() -> Value {
    object(
        &["id", "createdAt", "author"],
        json!({
            "id": string(None),
            "createdAt": string(Some("date-time")),
            "author": author()
        }),
    )
}
