// src/handlers/receivables.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{Receivable, UpdateReceivableRequest},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// List all receivables, newest first
#[utoipa::path(
    get,
    path = "/api/v1/receivables",
    responses(
        (status = 200, description = "List of receivables", body = Vec<Receivable>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Receivables"
)]
pub async fn list_receivables(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Receivable>>> {
    let receivables = sqlx::query_as::<_, Receivable>(
        "SELECT * FROM receivables ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(receivables))
}

/// Get a single receivable
#[utoipa::path(
    get,
    path = "/api/v1/receivables/{receivable_id}",
    params(("receivable_id" = Uuid, Path, description = "Receivable ID")),
    responses(
        (status = 200, description = "Receivable detail", body = Receivable),
        (status = 404, description = "Receivable not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Receivables"
)]
pub async fn get_receivable(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(receivable_id): Path<Uuid>,
) -> AppResult<Json<Receivable>> {
    let receivable =
        sqlx::query_as::<_, Receivable>("SELECT * FROM receivables WHERE id = $1")
            .bind(receivable_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Receivable {} not found", receivable_id))
            })?;

    Ok(Json(receivable))
}

/// Patch a receivable's payment tracking fields
#[utoipa::path(
    patch,
    path = "/api/v1/receivables/{receivable_id}",
    request_body = UpdateReceivableRequest,
    params(("receivable_id" = Uuid, Path, description = "Receivable ID")),
    responses(
        (status = 200, description = "Receivable updated", body = Receivable),
        (status = 404, description = "Receivable not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Receivables"
)]
pub async fn update_receivable(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(receivable_id): Path<Uuid>,
    Json(body): Json<UpdateReceivableRequest>,
) -> AppResult<Json<Receivable>> {
    if let Some(amount) = body.amount_received {
        if amount < dec!(0) {
            return Err(AppError::Validation(
                "Amount received cannot be negative".to_string(),
            ));
        }
    }

    let receivable = sqlx::query_as::<_, Receivable>(
        r#"UPDATE receivables
           SET amount_received = COALESCE($1, amount_received),
               received_date = COALESCE($2, received_date),
               due_date = COALESCE($3, due_date),
               status = COALESCE($4, status),
               nfe = COALESCE($5, nfe),
               order_ref = COALESCE($6, order_ref),
               industry_commission = COALESCE($7, industry_commission),
               updated_at = NOW()
           WHERE id = $8
           RETURNING *"#,
    )
    .bind(body.amount_received)
    .bind(body.received_date)
    .bind(body.due_date)
    .bind(&body.status)
    .bind(&body.nfe)
    .bind(&body.order_ref)
    .bind(body.industry_commission)
    .bind(receivable_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Receivable {} not found", receivable_id)))?;

    Ok(Json(receivable))
}

/// Delete a receivable
#[utoipa::path(
    delete,
    path = "/api/v1/receivables/{receivable_id}",
    params(("receivable_id" = Uuid, Path, description = "Receivable ID")),
    responses(
        (status = 200, description = "Receivable deleted"),
        (status = 404, description = "Receivable not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Receivables"
)]
pub async fn delete_receivable(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(receivable_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM receivables WHERE id = $1")
        .bind(receivable_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Receivable {} not found",
            receivable_id
        )));
    }

    Ok(Json(
        serde_json::json!({ "message": "Receivable deleted successfully" }),
    ))
}
