/// Authentication endpoints
///
/// - `POST /api/register` - Register a new user
/// - `POST /api/login` - Check a username/password pair
///
/// Login does not issue a token or cookie; the front end keeps the returned
/// username in its own session storage.

use crate::{
    app::AuthState,
    error::ApiResult,
    extract::ApiJson,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::fmt;
use tasklist_shared::auth::Credentials;
use validator::Validate;

/// Register and login request body
///
/// Missing fields deserialize as empty strings so they fail validation with a
/// 400 instead of a deserialization error.
#[derive(Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Username is required (at most 255 characters)"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<CredentialsRequest> for Credentials {
    fn from(req: CredentialsRequest) -> Self {
        Credentials::new(req.username, req.password)
    }
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,

    /// The authenticated username
    pub username: String,
}

/// Register a new user
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field or username already taken
/// - `500 Internal Server Error`: storage failure
pub async fn register(
    State(state): State<AuthState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    state.auth.register(req.into()).await?;

    Ok(Json(RegisterResponse { success: true }))
}

/// Log in
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "username": "alice" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field
/// - `401 Unauthorized`: unknown user or wrong password (same body for both)
/// - `500 Internal Server Error`: storage failure
pub async fn login(
    State(state): State<AuthState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = state.auth.login(req.into()).await?;

    Ok(Json(LoginResponse {
        success: true,
        username: user.username,
    }))
}
