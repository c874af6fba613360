// src/handlers/admin_users.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::AdminUserRequest,
    services::identity::IdentityService,
    state::AppState,
};
use axum::{Json, extract::State};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Admin user management, dispatched on the `action` field.
/// Supported actions: createUser, fetchAllUsers, updateUserRole. Everything
/// is passed through to the identity provider's admin API.
#[utoipa::path(
    post,
    path = "/api/v1/admin/users",
    request_body = AdminUserRequest,
    responses(
        (status = 200, description = "Action result, shape depends on the action"),
        (status = 400, description = "Missing fields or unknown action"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Identity provider failure"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Users"
)]
pub async fn admin_users(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<AdminUserRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let identity = IdentityService::new(Arc::clone(&state.config));

    match body.action.as_str() {
        "createUser" => {
            let (email, password, name, role) =
                match (&body.email, &body.password, &body.name, &body.role) {
                    (Some(email), Some(password), Some(name), Some(role)) => {
                        (email, password, name, role)
                    }
                    _ => {
                        return Err(AppError::BadRequest(
                            "Missing required fields: email, password, name, role".to_string(),
                        ));
                    }
                };

            info!("Admin {} creating user {} with role {}", auth.email, email, role);
            let user = identity.create_user(email, password, name, role).await?;
            Ok(Json(json!({ "success": true, "user": user })))
        }

        "fetchAllUsers" => {
            let users = identity.list_users().await?;
            Ok(Json(json!({ "success": true, "users": users })))
        }

        "updateUserRole" => {
            let (user_id, new_role) = match (&body.user_id, &body.new_role) {
                (Some(user_id), Some(new_role)) => (user_id, new_role),
                _ => {
                    return Err(AppError::BadRequest(
                        "Missing required fields: userId, newRole".to_string(),
                    ));
                }
            };

            info!("Admin {} setting role {} on user {}", auth.email, new_role, user_id);
            identity.update_user_role(user_id, new_role).await?;
            Ok(Json(json!({ "success": true })))
        }

        other => Err(AppError::BadRequest(format!("Invalid action: {}", other))),
    }
}
