//! Articles: create, edit, delete, favorite and unfavorite.
//!
//! Every operation here requires a token; passing `None` sends the request
//! without an `Authorization` header so the 401 path can be exercised.

use tracing::debug;

use super::empty_body;
use crate::error::ClientResult;
use crate::http::{ApiResponse, HttpAccessor, RequestOptions};
use crate::models::{ArticleDraft, ArticleEnvelope, ArticleUpdate};

#[derive(Debug, Clone)]
pub struct ArticlesController {
    http: HttpAccessor,
}

impl ArticlesController {
    pub fn new(http: HttpAccessor) -> Self {
        Self { http }
    }

    /// POST /api/articles
    pub async fn create(
        &self,
        article: &ArticleDraft,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        debug!("Create new article");
        self.http
            .post(
                "/api/articles",
                &ArticleEnvelope { article },
                RequestOptions::new().bearer(token),
            )
            .await
    }

    /// PUT /api/articles/:slug
    pub async fn edit(
        &self,
        slug: &str,
        changes: &ArticleUpdate,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        debug!("Edit article {}", slug);
        self.http
            .put(
                &article_path(slug),
                &ArticleEnvelope { article: changes },
                RequestOptions::new().bearer(token),
            )
            .await
    }

    /// DELETE /api/articles/:slug
    pub async fn delete(&self, slug: &str, token: Option<&str>) -> ClientResult<ApiResponse> {
        debug!("Delete article {}", slug);
        self.http
            .delete(
                &article_path(slug),
                &empty_body(),
                RequestOptions::new().bearer(token),
            )
            .await
    }

    /// POST /api/articles/:slug/favorite
    pub async fn favorite(&self, slug: &str, token: Option<&str>) -> ClientResult<ApiResponse> {
        debug!("Add article {} to favorites", slug);
        self.http
            .post(
                &favorite_path(slug),
                &empty_body(),
                RequestOptions::new().bearer(token),
            )
            .await
    }

    /// DELETE /api/articles/:slug/favorite
    pub async fn unfavorite(&self, slug: &str, token: Option<&str>) -> ClientResult<ApiResponse> {
        debug!("Remove article {} from favorites", slug);
        self.http
            .delete(
                &favorite_path(slug),
                &empty_body(),
                RequestOptions::new().bearer(token),
            )
            .await
    }
}

pub(crate) fn article_path(slug: &str) -> String {
    format!("/api/articles/{}", slug)
}

fn favorite_path(slug: &str) -> String {
    format!("/api/articles/{}/favorite", slug)
}
