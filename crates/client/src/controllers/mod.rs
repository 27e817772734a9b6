//! Resource controllers
//!
//! Each controller owns a clone of the shared `HttpAccessor` and exposes one
//! method per API operation. Methods build the endpoint, attach the bearer
//! token when one is supplied and return the raw response.

pub mod articles;
pub mod comments;
pub mod schemas;
pub mod search;
pub mod tags;
pub mod users;

pub use articles::ArticlesController;
pub use comments::CommentsController;
pub use schemas::SchemasController;
pub use search::SearchController;
pub use tags::TagsController;
pub use users::UsersController;

/// Empty JSON object sent as the body of bodiless writes
pub(crate) fn empty_body() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
