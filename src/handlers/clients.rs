// src/handlers/clients.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{Client, CreateClientRequest},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

fn validate_client(body: &CreateClientRequest) -> AppResult<()> {
    if body.corporate_name.trim().is_empty() {
        return Err(AppError::Validation("Corporate name is required".to_string()));
    }
    if body.trade_name.trim().is_empty() {
        return Err(AppError::Validation("Trade name is required".to_string()));
    }
    if body.cnpj.trim().is_empty() {
        return Err(AppError::Validation("CNPJ is required".to_string()));
    }
    Ok(())
}

/// Register a new client
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "CNPJ already registered"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clients"
)]
pub async fn create_client(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateClientRequest>,
) -> AppResult<(StatusCode, Json<Client>)> {
    validate_client(&body)?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM clients WHERE cnpj = $1")
        .bind(&body.cnpj)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Client with CNPJ '{}' already exists",
            body.cnpj
        )));
    }

    let client = sqlx::query_as::<_, Client>(
        r#"INSERT INTO clients (
            id, corporate_name, trade_name, cnpj, email, phone, state, segment, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,NOW(),NOW())
        RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.corporate_name)
    .bind(&body.trade_name)
    .bind(&body.cnpj)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(&body.state)
    .bind(&body.segment)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

/// List all clients
#[utoipa::path(
    get,
    path = "/api/v1/clients",
    responses(
        (status = 200, description = "List of clients", body = Vec<Client>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clients"
)]
pub async fn list_clients(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Client>>> {
    let clients =
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(clients))
}

/// Get a single client
#[utoipa::path(
    get,
    path = "/api/v1/clients/{client_id}",
    params(("client_id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client detail", body = Client),
        (status = 404, description = "Client not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clients"
)]
pub async fn get_client(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> AppResult<Json<Client>> {
    let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(client_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", client_id)))?;

    Ok(Json(client))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/api/v1/clients/{client_id}",
    request_body = CreateClientRequest,
    params(("client_id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clients"
)]
pub async fn update_client(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(body): Json<CreateClientRequest>,
) -> AppResult<Json<Client>> {
    validate_client(&body)?;

    let client = sqlx::query_as::<_, Client>(
        r#"UPDATE clients
           SET corporate_name = $1, trade_name = $2, cnpj = $3, email = $4,
               phone = $5, state = $6, segment = $7, updated_at = NOW()
           WHERE id = $8
           RETURNING *"#,
    )
    .bind(&body.corporate_name)
    .bind(&body.trade_name)
    .bind(&body.cnpj)
    .bind(&body.email)
    .bind(&body.phone)
    .bind(&body.state)
    .bind(&body.segment)
    .bind(client_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Client {} not found", client_id)))?;

    Ok(Json(client))
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{client_id}",
    params(("client_id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 404, description = "Client not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clients"
)]
pub async fn delete_client(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(client_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Client {} not found", client_id)));
    }

    Ok(Json(serde_json::json!({ "message": "Client deleted successfully" })))
}
