//! Conduit API client
//!
//! Typed access to a Conduit-style blogging API for contract testing:
//! - `HttpAccessor` issues GET/POST/PUT/DELETE against a configured base URL
//! - one controller per resource family turns raw calls into named operations
//! - `ApiHandle` bundles every controller over one shared HTTP client
//! - `ResponseSchema` holds the declarative contract of each response body
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ ApiHandle                                                │
//! │   ├── users     (sign up, sign in, edit/get profile)     │
//! │   ├── articles  (create, edit, delete, favorite, unfav)  │
//! │   ├── comments  (add, list, delete)                      │
//! │   ├── search    (list with filters, get by slug)         │
//! │   ├── tags      (list)                                   │
//! │   └── schemas   (validate body against ResponseSchema)   │
//! ├──────────────────────────────────────────────────────────┤
//! │ HttpAccessor ── reqwest::Client ── TraceRecorder (opt)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Controllers never assert. They return the raw `ApiResponse` so callers can
//! check status codes and shapes themselves.

pub mod api;
pub mod controllers;
pub mod error;
pub mod http;
pub mod models;
pub mod schemas;

pub use api::ApiHandle;
pub use error::{ClientError, ClientResult};
pub use http::{ApiResponse, HttpAccessor, RequestOptions, TraceEntry, TraceRecorder};
pub use schemas::ResponseSchema;

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
