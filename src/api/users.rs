//! User API endpoints.

use axum::{extract::State, Json};

use super::ApiResponse;
use crate::auth;
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse};
use crate::AppState;

/// POST /v1/user/login - Exchange credentials for a bearer token.
///
/// Unknown email and wrong password produce the same response so the
/// endpoint does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = state
        .users
        .get_by_email(&request.email)
        .await?
        .filter(|user| {
            auth::verify_password(
                &state.config.hashing_salt,
                &request.password,
                &user.password_hash,
            )
        })
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let (token, expires_at) =
        auth::issue_token(&state.config.jwt_secret, user.id).map_err(|err| {
            tracing::error!("Failed to issue token: {}", err);
            AppError::Unexpected
        })?;

    Ok(ApiResponse::new(LoginResponse { token, expires_at }))
}
