//! API handle - one instance of every controller over a shared client

use crate::controllers::{
    ArticlesController, CommentsController, SchemasController, SearchController, TagsController,
    UsersController,
};
use crate::http::HttpAccessor;

/// Facade bundling every resource controller.
///
/// All controllers share the accessor's underlying client, so building a
/// handle per test is cheap.
#[derive(Debug, Clone)]
pub struct ApiHandle {
    pub users: UsersController,
    pub articles: ArticlesController,
    pub comments: CommentsController,
    pub search: SearchController,
    pub tags: TagsController,
    pub schemas: SchemasController,
    http: HttpAccessor,
}

impl ApiHandle {
    pub fn new(http: HttpAccessor) -> Self {
        Self {
            users: UsersController::new(http.clone()),
            articles: ArticlesController::new(http.clone()),
            comments: CommentsController::new(http.clone()),
            search: SearchController::new(http.clone()),
            tags: TagsController::new(http.clone()),
            schemas: SchemasController::new(),
            http,
        }
    }

    pub fn http(&self) -> &HttpAccessor {
        &self.http
    }
}
