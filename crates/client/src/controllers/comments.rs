//! Comments on an article

use tracing::debug;

use super::empty_body;
use crate::error::ClientResult;
use crate::http::{ApiResponse, HttpAccessor, RequestOptions};
use crate::models::{CommentEnvelope, NewComment};

#[derive(Debug, Clone)]
pub struct CommentsController {
    http: HttpAccessor,
}

impl CommentsController {
    pub fn new(http: HttpAccessor) -> Self {
        Self { http }
    }

    /// POST /api/articles/:slug/comments
    pub async fn add(
        &self,
        slug: &str,
        comment: &NewComment,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        debug!("Add comment to article {}", slug);
        self.http
            .post(
                &comments_path(slug),
                &CommentEnvelope { comment },
                RequestOptions::new().bearer(token),
            )
            .await
    }

    /// GET /api/articles/:slug/comments
    pub async fn list(&self, slug: &str) -> ClientResult<ApiResponse> {
        debug!("Get comments for article {}", slug);
        self.http.get(&comments_path(slug), RequestOptions::new()).await
    }

    /// DELETE /api/articles/:slug/comments/:id
    pub async fn delete(
        &self,
        slug: &str,
        comment_id: &str,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        debug!("Delete comment {} from article {}", comment_id, slug);
        self.http
            .delete(
                &format!("{}/{}", comments_path(slug), comment_id),
                &empty_body(),
                RequestOptions::new().bearer(token),
            )
            .await
    }
}

fn comments_path(slug: &str) -> String {
    format!("/api/articles/{}/comments", slug)
}
