// src/handlers/auth_routes.rs

use crate::{
    errors::{AppError, AppResult},
    models::{LoginRequest, LoginResponse},
    services::identity::IdentityService,
    state::AppState,
};
use axum::{Json, extract::State};
use std::sync::Arc;

/// Sign in with email and password.
/// Credentials are verified by the identity provider; the returned token is
/// used as the bearer token for every other endpoint.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let identity = IdentityService::new(Arc::clone(&state.config));
    let (access_token, user) = identity.sign_in(&body.email, &body.password).await?;

    Ok(Json(LoginResponse { access_token, user }))
}
