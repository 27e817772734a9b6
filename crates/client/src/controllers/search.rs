//! Public article listing and lookup

use tracing::debug;

use super::articles::article_path;
use crate::error::ClientResult;
use crate::http::{ApiResponse, HttpAccessor, RequestOptions};
use crate::models::ArticleQuery;

#[derive(Debug, Clone)]
pub struct SearchController {
    http: HttpAccessor,
}

impl SearchController {
    pub fn new(http: HttpAccessor) -> Self {
        Self { http }
    }

    /// GET /api/articles with optional author/tag/favorited/limit/offset filters
    pub async fn list_articles(&self, query: &ArticleQuery) -> ClientResult<ApiResponse> {
        debug!("List articles {:?}", query);
        let options = query
            .to_pairs()
            .into_iter()
            .fold(RequestOptions::new(), |options, (key, value)| options.query(key, value));
        self.http.get("/api/articles", options).await
    }

    /// GET /api/articles/:slug
    pub async fn get_article(&self, slug: &str) -> ClientResult<ApiResponse> {
        debug!("Get article {}", slug);
        self.http.get(&article_path(slug), RequestOptions::new()).await
    }
}
