//! User account endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::user::{ChangePasswordRequest, RegisterRequest};

/// Request to create a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "type", default)]
    pub user_type: i64,
}

/// Candidate password to check against the stored hash
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatePasswordApiRequest {
    pub password: String,
}

/// Request to change a user's password
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordApiRequest {
    pub current_pwd: String,
    pub new_pwd: String,
    pub new_pwd_duplicate: String,
}

/// User as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(rename = "type")]
    pub user_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserResponse {
    fn from_user(user: &User, expose_password_hash: bool) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            username: user.username().to_string(),
            user_type: user.user_type(),
            password: expose_password_hash.then(|| user.password_hash().to_string()),
        }
    }
}

/// Result of a password check
#[derive(Debug, Clone, Serialize)]
pub struct ValidatePasswordResponse {
    pub validated: bool,
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing all users");

    let users = state.account_service.list_all().await?;

    Ok(Json(
        users
            .iter()
            .map(|u| UserResponse::from_user(u, state.expose_password_hash))
            .collect(),
    ))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "Getting user");

    let user = state.account_service.lookup(&id).await?;

    Ok(Json(UserResponse::from_user(&user, state.expose_password_hash)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(username = %request.username, "Creating user");

    let user = state
        .account_service
        .register(RegisterRequest {
            username: request.username,
            password: request.password,
            user_type: request.user_type,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(&user, state.expose_password_hash)),
    ))
}

/// POST /users/validatepwd/{id}
pub async fn validate_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ValidatePasswordApiRequest>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(user_id = %id, "Validating password");

    let validated = state
        .account_service
        .validate_password(&id, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ValidatePasswordResponse { validated })))
}

/// POST /users/changepwd/{id}
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChangePasswordApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "Changing password");

    let user = state
        .account_service
        .change_password(
            &id,
            ChangePasswordRequest {
                current_password: request.current_pwd,
                new_password: request.new_pwd,
                new_password_duplicate: request.new_pwd_duplicate,
            },
        )
        .await?;

    Ok(Json(UserResponse::from_user(&user, state.expose_password_hash)))
}
