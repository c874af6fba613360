// src/handlers/industries.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{CreateIndustryRequest, Industry},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate_industry(body: &CreateIndustryRequest) -> AppResult<()> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Industry name is required".to_string()));
    }
    if body.cnpj.trim().is_empty() {
        return Err(AppError::Validation("CNPJ is required".to_string()));
    }
    if body.state.trim().is_empty() {
        return Err(AppError::Validation("State is required".to_string()));
    }
    if body.group_name.trim().is_empty() {
        return Err(AppError::Validation("Group is required".to_string()));
    }
    Ok(())
}

/// Register a new industry (a supplier the representatives sell for)
#[utoipa::path(
    post,
    path = "/api/v1/industries",
    request_body = CreateIndustryRequest,
    responses(
        (status = 201, description = "Industry created", body = Industry),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Industries"
)]
pub async fn create_industry(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateIndustryRequest>,
) -> AppResult<(StatusCode, Json<Industry>)> {
    validate_industry(&body)?;

    let industry = sqlx::query_as::<_, Industry>(
        r#"INSERT INTO industries (id, name, cnpj, state, group_name, created_at, updated_at)
           VALUES ($1,$2,$3,$4,$5,NOW(),NOW())
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.name)
    .bind(&body.cnpj)
    .bind(&body.state)
    .bind(&body.group_name)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(industry)))
}

/// List all industries
#[utoipa::path(
    get,
    path = "/api/v1/industries",
    responses(
        (status = 200, description = "List of industries", body = Vec<Industry>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Industries"
)]
pub async fn list_industries(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Industry>>> {
    let industries =
        sqlx::query_as::<_, Industry>("SELECT * FROM industries ORDER BY name")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(industries))
}

/// Get a single industry
#[utoipa::path(
    get,
    path = "/api/v1/industries/{industry_id}",
    params(("industry_id" = Uuid, Path, description = "Industry ID")),
    responses(
        (status = 200, description = "Industry detail", body = Industry),
        (status = 404, description = "Industry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Industries"
)]
pub async fn get_industry(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(industry_id): Path<Uuid>,
) -> AppResult<Json<Industry>> {
    let industry = sqlx::query_as::<_, Industry>("SELECT * FROM industries WHERE id = $1")
        .bind(industry_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Industry {} not found", industry_id)))?;

    Ok(Json(industry))
}

/// Update an industry
#[utoipa::path(
    put,
    path = "/api/v1/industries/{industry_id}",
    request_body = CreateIndustryRequest,
    params(("industry_id" = Uuid, Path, description = "Industry ID")),
    responses(
        (status = 200, description = "Industry updated", body = Industry),
        (status = 404, description = "Industry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Industries"
)]
pub async fn update_industry(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(industry_id): Path<Uuid>,
    Json(body): Json<CreateIndustryRequest>,
) -> AppResult<Json<Industry>> {
    validate_industry(&body)?;

    let industry = sqlx::query_as::<_, Industry>(
        r#"UPDATE industries
           SET name = $1, cnpj = $2, state = $3, group_name = $4, updated_at = NOW()
           WHERE id = $5
           RETURNING *"#,
    )
    .bind(&body.name)
    .bind(&body.cnpj)
    .bind(&body.state)
    .bind(&body.group_name)
    .bind(industry_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Industry {} not found", industry_id)))?;

    Ok(Json(industry))
}

/// Delete an industry
#[utoipa::path(
    delete,
    path = "/api/v1/industries/{industry_id}",
    params(("industry_id" = Uuid, Path, description = "Industry ID")),
    responses(
        (status = 200, description = "Industry deleted"),
        (status = 404, description = "Industry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Industries"
)]
pub async fn delete_industry(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(industry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM industries WHERE id = $1")
        .bind(industry_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Industry {} not found",
            industry_id
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Industry deleted successfully" })))
}
