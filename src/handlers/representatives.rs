// src/handlers/representatives.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{CreateRepresentativeRequest, Representative},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Register a new representative
#[utoipa::path(
    post,
    path = "/api/v1/representatives",
    request_body = CreateRepresentativeRequest,
    responses(
        (status = 201, description = "Representative created", body = Representative),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Representatives"
)]
pub async fn create_representative(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateRepresentativeRequest>,
) -> AppResult<(StatusCode, Json<Representative>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Representative name is required".to_string(),
        ));
    }

    let representative = sqlx::query_as::<_, Representative>(
        r#"INSERT INTO representatives (id, name, email, phone, is_master, user_id, created_at, updated_at)
           VALUES ($1,$2,$3,$4,$5,$6,NOW(),NOW())
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.name)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(body.is_master)
    .bind(body.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(representative)))
}

/// List all representatives
#[utoipa::path(
    get,
    path = "/api/v1/representatives",
    responses(
        (status = 200, description = "List of representatives", body = Vec<Representative>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Representatives"
)]
pub async fn list_representatives(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Representative>>> {
    let representatives =
        sqlx::query_as::<_, Representative>("SELECT * FROM representatives ORDER BY name")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(representatives))
}

/// Get a single representative
#[utoipa::path(
    get,
    path = "/api/v1/representatives/{representative_id}",
    params(("representative_id" = Uuid, Path, description = "Representative ID")),
    responses(
        (status = 200, description = "Representative detail", body = Representative),
        (status = 404, description = "Representative not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Representatives"
)]
pub async fn get_representative(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(representative_id): Path<Uuid>,
) -> AppResult<Json<Representative>> {
    let representative =
        sqlx::query_as::<_, Representative>("SELECT * FROM representatives WHERE id = $1")
            .bind(representative_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Representative {} not found", representative_id))
            })?;

    Ok(Json(representative))
}

/// Update a representative.
/// Toggling is_master re-normalizes the pass-through percent on all of the
/// representative's commission rules (masters keep the full industry percent).
#[utoipa::path(
    put,
    path = "/api/v1/representatives/{representative_id}",
    request_body = CreateRepresentativeRequest,
    params(("representative_id" = Uuid, Path, description = "Representative ID")),
    responses(
        (status = 200, description = "Representative updated", body = Representative),
        (status = 404, description = "Representative not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Representatives"
)]
pub async fn update_representative(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(representative_id): Path<Uuid>,
    Json(body): Json<CreateRepresentativeRequest>,
) -> AppResult<Json<Representative>> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Representative name is required".to_string(),
        ));
    }

    let representative = sqlx::query_as::<_, Representative>(
        r#"UPDATE representatives
           SET name = $1, email = $2, phone = $3, is_master = $4, user_id = $5, updated_at = NOW()
           WHERE id = $6
           RETURNING *"#,
    )
    .bind(&body.name)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(body.is_master)
    .bind(body.user_id)
    .bind(representative_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Representative {} not found", representative_id)))?;

    if representative.is_master {
        sqlx::query(
            r#"UPDATE commission_rules
               SET pass_through_percent = industry_percent, updated_at = NOW()
               WHERE representative_id = $1 AND pass_through_percent <> industry_percent"#,
        )
        .bind(representative_id)
        .execute(&state.db)
        .await?;
    }

    Ok(Json(representative))
}

/// Delete a representative
#[utoipa::path(
    delete,
    path = "/api/v1/representatives/{representative_id}",
    params(("representative_id" = Uuid, Path, description = "Representative ID")),
    responses(
        (status = 200, description = "Representative deleted"),
        (status = 404, description = "Representative not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Representatives"
)]
pub async fn delete_representative(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(representative_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM representatives WHERE id = $1")
        .bind(representative_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Representative {} not found",
            representative_id
        )));
    }

    Ok(Json(
        serde_json::json!({ "message": "Representative deleted successfully" }),
    ))
}
