// src/handlers/categories.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{Category, CreateCategoryRequest},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Register a new product category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Category name is required".to_string()));
    }

    let category = sqlx::query_as::<_, Category>(
        r#"INSERT INTO categories (id, name, description, created_at, updated_at)
           VALUES ($1,$2,$3,NOW(),NOW())
           RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.name)
    .bind(&body.description)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(categories))
}

/// Get a single category
#[utoipa::path(
    get,
    path = "/api/v1/categories/{category_id}",
    params(("category_id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category detail", body = Category),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn get_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))?;

    Ok(Json(category))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{category_id}",
    request_body = CreateCategoryRequest,
    params(("category_id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(body): Json<CreateCategoryRequest>,
) -> AppResult<Json<Category>> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Category name is required".to_string()));
    }

    let category = sqlx::query_as::<_, Category>(
        r#"UPDATE categories
           SET name = $1, description = $2, updated_at = NOW()
           WHERE id = $3
           RETURNING *"#,
    )
    .bind(&body.name)
    .bind(&body.description)
    .bind(category_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))?;

    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{category_id}",
    params(("category_id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Category {} not found",
            category_id
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Category deleted successfully" })))
}
