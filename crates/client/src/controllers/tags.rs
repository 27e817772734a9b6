use tracing::debug;

use crate::error::ClientResult;
use crate::http::{ApiResponse, HttpAccessor, RequestOptions};

#[derive(Debug, Clone)]
pub struct TagsController {
    http: HttpAccessor,
}

impl TagsController {
    pub fn new(http: HttpAccessor) -> Self {
        Self { http }
    }

    /// GET /api/tags
    pub async fn list(&self) -> ClientResult<ApiResponse> {
        debug!("Get tags");
        self.http.get("/api/tags", RequestOptions::new()).await
    }
}
