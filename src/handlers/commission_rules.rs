// src/handlers/commission_rules.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{
        CalculationBase, CommissionOutcome, CommissionRule, CreateCommissionRuleRequest,
        Representative, ResolveCommissionRequest,
    },
    services::commission::CommissionService,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn validate_percents(industry_percent: Decimal, pass_through_percent: Decimal) -> AppResult<()> {
    if industry_percent <= dec!(0) || industry_percent > dec!(100) {
        return Err(AppError::Validation(
            "Industry percent must be greater than 0 and at most 100".to_string(),
        ));
    }
    if pass_through_percent < dec!(0) || pass_through_percent > dec!(100) {
        return Err(AppError::Validation(
            "Pass-through percent must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

async fn fetch_representative(
    state: &AppState,
    representative_id: Uuid,
) -> AppResult<Representative> {
    sqlx::query_as::<_, Representative>("SELECT * FROM representatives WHERE id = $1")
        .bind(representative_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Representative {} not found", representative_id))
        })
}

/// Create a commission rule.
/// For master representatives the pass-through percent is stored equal to the
/// industry percent, whatever the caller sent.
#[utoipa::path(
    post,
    path = "/api/v1/commission-rules",
    request_body = CreateCommissionRuleRequest,
    responses(
        (status = 201, description = "Commission rule created", body = CommissionRule),
        (status = 400, description = "Invalid percents"),
        (status = 404, description = "Representative not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Commission Rules"
)]
pub async fn create_commission_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateCommissionRuleRequest>,
) -> AppResult<(StatusCode, Json<CommissionRule>)> {
    validate_percents(body.industry_percent, body.pass_through_percent)?;

    let representative = fetch_representative(&state, body.representative_id).await?;
    let pass_through_percent = if representative.is_master {
        body.industry_percent
    } else {
        body.pass_through_percent
    };

    let rule = sqlx::query_as::<_, CommissionRule>(
        r#"INSERT INTO commission_rules (
            id, representative_id, industry_id, category_id,
            industry_percent, pass_through_percent, calculation_base, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,NOW(),NOW())
        RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(body.representative_id)
    .bind(body.industry_id)
    .bind(body.category_id)
    .bind(body.industry_percent)
    .bind(pass_through_percent)
    .bind(body.calculation_base)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(rule)))
}

/// List all commission rules
#[utoipa::path(
    get,
    path = "/api/v1/commission-rules",
    responses(
        (status = 200, description = "List of commission rules", body = Vec<CommissionRule>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Commission Rules"
)]
pub async fn list_commission_rules(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CommissionRule>>> {
    let rules = sqlx::query_as::<_, CommissionRule>(
        "SELECT * FROM commission_rules ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rules))
}

/// Update a commission rule
#[utoipa::path(
    put,
    path = "/api/v1/commission-rules/{rule_id}",
    request_body = CreateCommissionRuleRequest,
    params(("rule_id" = Uuid, Path, description = "Commission rule ID")),
    responses(
        (status = 200, description = "Commission rule updated", body = CommissionRule),
        (status = 404, description = "Rule or representative not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Commission Rules"
)]
pub async fn update_commission_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
    Json(body): Json<CreateCommissionRuleRequest>,
) -> AppResult<Json<CommissionRule>> {
    validate_percents(body.industry_percent, body.pass_through_percent)?;

    let representative = fetch_representative(&state, body.representative_id).await?;
    let pass_through_percent = if representative.is_master {
        body.industry_percent
    } else {
        body.pass_through_percent
    };

    let rule = sqlx::query_as::<_, CommissionRule>(
        r#"UPDATE commission_rules
           SET representative_id = $1, industry_id = $2, category_id = $3,
               industry_percent = $4, pass_through_percent = $5, calculation_base = $6,
               updated_at = NOW()
           WHERE id = $7
           RETURNING *"#,
    )
    .bind(body.representative_id)
    .bind(body.industry_id)
    .bind(body.category_id)
    .bind(body.industry_percent)
    .bind(pass_through_percent)
    .bind(body.calculation_base)
    .bind(rule_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Commission rule {} not found", rule_id)))?;

    Ok(Json(rule))
}

/// Delete a commission rule
#[utoipa::path(
    delete,
    path = "/api/v1/commission-rules/{rule_id}",
    params(("rule_id" = Uuid, Path, description = "Commission rule ID")),
    responses(
        (status = 200, description = "Commission rule deleted"),
        (status = 404, description = "Rule not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Commission Rules"
)]
pub async fn delete_commission_rule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM commission_rules WHERE id = $1")
        .bind(rule_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Commission rule {} not found",
            rule_id
        )));
    }

    Ok(Json(
        serde_json::json!({ "message": "Commission rule deleted successfully" }),
    ))
}

/// Preview the commission for a base value without touching any sale.
/// Resolution misses come back as a zero-percent outcome, not an error.
#[utoipa::path(
    post,
    path = "/api/v1/commission-rules/resolve",
    request_body = ResolveCommissionRequest,
    responses(
        (status = 200, description = "Resolved commission", body = CommissionOutcome),
        (status = 404, description = "Representative not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Commission Rules"
)]
pub async fn resolve_commission(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<ResolveCommissionRequest>,
) -> AppResult<Json<CommissionOutcome>> {
    let representative = fetch_representative(&state, body.representative_id).await?;

    let rules = sqlx::query_as::<_, CommissionRule>(
        "SELECT * FROM commission_rules WHERE representative_id = $1",
    )
    .bind(body.representative_id)
    .fetch_all(&state.db)
    .await?;

    let outcome = CommissionService::calculate(
        &rules,
        body.representative_id,
        body.industry_id,
        body.base_value,
        body.category_id,
        body.calculation_base.unwrap_or(CalculationBase::Total),
        body.enable_pass_through,
        representative.is_master,
    );

    Ok(Json(outcome))
}
