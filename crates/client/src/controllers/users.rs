//! Users: sign up, sign in, edit and read the current profile

use tracing::debug;

use crate::error::ClientResult;
use crate::http::{ApiResponse, HttpAccessor, RequestOptions};
use crate::models::{LoginUser, NewUser, UserEnvelope, UserUpdate};

#[derive(Debug, Clone)]
pub struct UsersController {
    http: HttpAccessor,
}

impl UsersController {
    pub fn new(http: HttpAccessor) -> Self {
        Self { http }
    }

    /// POST /api/users
    pub async fn sign_up(&self, user: &NewUser) -> ClientResult<ApiResponse> {
        debug!("Sign up new user");
        self.http
            .post("/api/users", &UserEnvelope { user }, RequestOptions::new())
            .await
    }

    /// POST /api/users/login
    pub async fn sign_in(&self, credentials: &LoginUser) -> ClientResult<ApiResponse> {
        debug!("Sign in user");
        self.http
            .post(
                "/api/users/login",
                &UserEnvelope { user: credentials },
                RequestOptions::new(),
            )
            .await
    }

    /// PUT /api/user
    pub async fn edit_profile(
        &self,
        update: &UserUpdate,
        token: Option<&str>,
    ) -> ClientResult<ApiResponse> {
        debug!("Edit user profile");
        self.http
            .put(
                "/api/user",
                &UserEnvelope { user: update },
                RequestOptions::new().bearer(token),
            )
            .await
    }

    /// GET /api/user
    pub async fn get_profile(&self, token: Option<&str>) -> ClientResult<ApiResponse> {
        debug!("Get user profile");
        self.http
            .get("/api/user", RequestOptions::new().bearer(token))
            .await
    }
}
