//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::models::User;
use crate::services::auth::{RegisterInput, SignInInput, SignInResponse};
use crate::services::AuthService;
use crate::AppState;

/// Register the admin account
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Verify credentials and issue an access token
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInInput>,
) -> AppResult<Json<SignInResponse>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let response = service.sign_in(input).await?;
    Ok(Json(response))
}
