// src/handlers/products.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{CreateProductRequest, ListProductsQuery, Product},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn validate_product(body: &CreateProductRequest) -> AppResult<()> {
    if body.code.trim().is_empty() {
        return Err(AppError::Validation("Product code is required".to_string()));
    }
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Product name is required".to_string()));
    }
    if let Some(price) = body.base_price {
        if price < dec!(0) {
            return Err(AppError::Validation(
                "Base price cannot be negative".to_string(),
            ));
        }
    }
    if let Some(ipi) = body.ipi_percent {
        if ipi < dec!(0) || ipi > dec!(100) {
            return Err(AppError::Validation(
                "IPI percent must be between 0 and 100".to_string(),
            ));
        }
    }
    Ok(())
}

/// Register a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_product(&body)?;

    let product = sqlx::query_as::<_, Product>(
        r#"INSERT INTO products (
            id, code, name, base_price, ipi_percent, ean, ncm, category_id, industry_id,
            created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,NOW(),NOW())
        RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.code)
    .bind(&body.name)
    .bind(body.base_price)
    .bind(body.ipi_percent)
    .bind(&body.ean)
    .bind(&body.ncm)
    .bind(body.category_id)
    .bind(body.industry_id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// List products, optionally restricted to one industry's catalog
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = match query.industry_id {
        Some(industry_id) => {
            sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE industry_id = $1 ORDER BY name",
            )
            .bind(industry_id)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(products))
}

/// Get a single product
#[utoipa::path(
    get,
    path = "/api/v1/products/{product_id}",
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product detail", body = Product),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn get_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/products/{product_id}",
    request_body = CreateProductRequest,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(body): Json<CreateProductRequest>,
) -> AppResult<Json<Product>> {
    validate_product(&body)?;

    let product = sqlx::query_as::<_, Product>(
        r#"UPDATE products
           SET code = $1, name = $2, base_price = $3, ipi_percent = $4, ean = $5,
               ncm = $6, category_id = $7, industry_id = $8, updated_at = NOW()
           WHERE id = $9
           RETURNING *"#,
    )
    .bind(&body.code)
    .bind(&body.name)
    .bind(body.base_price)
    .bind(body.ipi_percent)
    .bind(&body.ean)
    .bind(&body.ncm)
    .bind(body.category_id)
    .bind(body.industry_id)
    .bind(product_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{product_id}",
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Product {} not found",
            product_id
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Product deleted successfully" })))
}
