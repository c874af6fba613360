// src/handlers/sales.rs

use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    format,
    models::{
        CommissionRule, CreateSaleRequest, InvoiceSaleRequest, InvoiceSaleResponse,
        ListSalesQuery, Product, Representative, Sale, SaleItem, SaleItemInput, SaleStatus,
        SaleWithItems, UpdateSaleRequest,
    },
    services::{
        cart::{CartLine, cart_totals},
        commission::CommissionService,
        invoice::{InvoiceLine, invoice_totals},
        sale_status::derive_status,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{error, warn};
use uuid::Uuid;

// ─── Helpers ──────────────────────────────────────────────────────────────────

struct PreparedItem {
    product_id: Option<Uuid>,
    product_name: String,
    product_code: Option<String>,
    line: CartLine,
}

fn validate_dates(issue_date: NaiveDate, expected_delivery: Option<NaiveDate>) -> AppResult<()> {
    if issue_date > Utc::now().date_naive() {
        return Err(AppError::Validation(
            "Issue date cannot be in the future".to_string(),
        ));
    }
    if let Some(delivery) = expected_delivery {
        if delivery < issue_date {
            return Err(AppError::Validation(
                "Expected delivery cannot precede the issue date".to_string(),
            ));
        }
    }
    Ok(())
}

async fn fetch_sale(state: &AppState, sale_id: Uuid) -> AppResult<Sale> {
    sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
        .bind(sale_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Sale {} not found", sale_id)))
}

async fn fetch_sale_items(state: &AppState, sale_id: Uuid) -> AppResult<Vec<SaleItem>> {
    Ok(sqlx::query_as::<_, SaleItem>(
        "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY created_at",
    )
    .bind(sale_id)
    .fetch_all(&state.db)
    .await?)
}

async fn ensure_reference(state: &AppState, table: &str, id: Uuid, label: &str) -> AppResult<()> {
    let query = format!("SELECT 1 FROM {} WHERE id = $1", table);
    let found: Option<(i32,)> = sqlx::query_as(&query)
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    if found.is_none() {
        return Err(AppError::Validation(format!("{} {} does not exist", label, id)));
    }
    Ok(())
}

/// Turn raw line inputs into fully derived cart lines. Catalog products
/// contribute their defaults; the commission percent falls back to the
/// resolved rule for the representative, industry and product category.
async fn prepare_items(
    state: &AppState,
    inputs: &[SaleItemInput],
    industry_id: Uuid,
    representative: &Representative,
    rules: &[CommissionRule],
    enable_pass_through: bool,
) -> AppResult<Vec<PreparedItem>> {
    let mut prepared = Vec::with_capacity(inputs.len());

    for input in inputs {
        let product = match input.product_id {
            Some(product_id) => Some(
                sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
                    .bind(product_id)
                    .fetch_optional(&state.db)
                    .await?
                    .ok_or_else(|| {
                        AppError::Validation(format!("Product {} does not exist", product_id))
                    })?,
            ),
            None => None,
        };

        let product_name = input
            .product_name
            .clone()
            .or_else(|| product.as_ref().map(|p| p.name.clone()))
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Each item needs a product or a product name".to_string())
            })?;
        let product_code = input
            .product_code
            .clone()
            .or_else(|| product.as_ref().map(|p| p.code.clone()));

        if input.quantity <= dec!(0) {
            return Err(AppError::Validation(
                "Item quantity must be greater than zero".to_string(),
            ));
        }

        let unit_price = input
            .unit_price
            .or_else(|| product.as_ref().and_then(|p| p.base_price))
            .unwrap_or(Decimal::ZERO);
        if unit_price < dec!(0) {
            return Err(AppError::Validation(
                "Unit price cannot be negative".to_string(),
            ));
        }

        let ipi_percent = input
            .ipi_percent
            .or_else(|| product.as_ref().and_then(|p| p.ipi_percent))
            .unwrap_or(Decimal::ZERO);
        if ipi_percent < dec!(0) || ipi_percent > dec!(100) {
            return Err(AppError::Validation(
                "IPI percent must be between 0 and 100".to_string(),
            ));
        }

        let commission_percent = match input.commission_percent {
            Some(percent) => {
                if percent < dec!(0) || percent > dec!(100) {
                    return Err(AppError::Validation(
                        "Commission percent must be between 0 and 100".to_string(),
                    ));
                }
                percent
            }
            None => {
                let category_id = product.as_ref().and_then(|p| p.category_id);
                CommissionService::find_rule(
                    rules,
                    representative.id,
                    industry_id,
                    category_id,
                )
                .map(|rule| {
                    CommissionService::effective_percent(
                        rule,
                        enable_pass_through,
                        representative.is_master,
                    )
                })
                .unwrap_or(Decimal::ZERO)
            }
        };

        prepared.push(PreparedItem {
            product_id: input.product_id,
            product_name,
            product_code,
            line: CartLine::new(input.quantity, unit_price, ipi_percent, commission_percent),
        });
    }

    Ok(prepared)
}

async fn insert_items(
    state: &AppState,
    sale_id: Uuid,
    items: &[PreparedItem],
) -> Result<(), sqlx::Error> {
    for item in items {
        sqlx::query(
            r#"INSERT INTO sale_items (
                id, sale_id, product_id, product_name, product_code,
                quantity, unit_price, ipi_percent, ipi_amount, subtotal, total,
                commission_percent, commission_amount, dropped, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,FALSE,NOW(),NOW())"#,
        )
        .bind(Uuid::new_v4())
        .bind(sale_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(&item.product_code)
        .bind(item.line.quantity)
        .bind(item.line.unit_price)
        .bind(item.line.ipi_percent)
        .bind(item.line.ipi_amount)
        .bind(item.line.subtotal)
        .bind(item.line.total)
        .bind(item.line.commission_percent)
        .bind(item.line.commission_amount)
        .execute(&state.db)
        .await?;
    }
    Ok(())
}

async fn load_rules(state: &AppState, representative_id: Uuid) -> AppResult<Vec<CommissionRule>> {
    Ok(sqlx::query_as::<_, CommissionRule>(
        "SELECT * FROM commission_rules WHERE representative_id = $1",
    )
    .bind(representative_id)
    .fetch_all(&state.db)
    .await?)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// Book a sale with its line items.
/// Derived amounts, the order total and the workflow status are computed
/// server-side; the caller only supplies raw line inputs.
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale created", body = SaleWithItems),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn create_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<SaleWithItems>)> {
    if body.order_type.trim().is_empty() {
        return Err(AppError::Validation("Order type is required".to_string()));
    }
    if body.payment_terms.trim().is_empty() {
        return Err(AppError::Validation("Payment terms are required".to_string()));
    }
    validate_dates(body.issue_date, body.expected_delivery)?;

    ensure_reference(&state, "clients", body.client_id, "Client").await?;
    ensure_reference(&state, "industries", body.industry_id, "Industry").await?;
    let representative = sqlx::query_as::<_, Representative>(
        "SELECT * FROM representatives WHERE id = $1",
    )
    .bind(body.representative_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        AppError::Validation(format!(
            "Representative {} does not exist",
            body.representative_id
        ))
    })?;

    let rules = load_rules(&state, representative.id).await?;
    let items = prepare_items(
        &state,
        &body.items,
        body.industry_id,
        &representative,
        &rules,
        body.enable_pass_through,
    )
    .await?;

    let lines: Vec<CartLine> = items.iter().map(|i| i.line.clone()).collect();
    let totals = cart_totals(&lines);
    let status = derive_status(body.issue_date, body.expected_delivery);

    let sale = sqlx::query_as::<_, Sale>(
        r#"INSERT INTO sales (
            id, order_number, client_id, representative_id, industry_id,
            order_type, payment_terms, issue_date, expected_delivery, notes,
            status, total_value, commission, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,NOW(),NOW())
        RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.order_number)
    .bind(body.client_id)
    .bind(body.representative_id)
    .bind(body.industry_id)
    .bind(&body.order_type)
    .bind(&body.payment_terms)
    .bind(body.issue_date)
    .bind(body.expected_delivery)
    .bind(&body.notes)
    .bind(status)
    .bind(totals.grand_total)
    .bind(totals.total_commission)
    .fetch_one(&state.db)
    .await?;

    // Two calls, no transaction: if the items fail, roll the sale back
    // best-effort so no half-booked order is left behind.
    if let Err(e) = insert_items(&state, sale.id, &items).await {
        error!("Failed to insert items for sale {}: {}", sale.id, e);
        let _ = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(sale.id)
            .execute(&state.db)
            .await;
        return Err(AppError::Database(e));
    }

    let stored_items = fetch_sale_items(&state, sale.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SaleWithItems {
            sale,
            items: stored_items,
        }),
    ))
}

/// List sales with optional status, industry, date-range and text filters
#[utoipa::path(
    get,
    path = "/api/v1/sales",
    params(ListSalesQuery),
    responses(
        (status = 200, description = "List of sales", body = Vec<Sale>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn list_sales(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let mut builder =
        sqlx::QueryBuilder::<sqlx::Postgres>::new("SELECT * FROM sales WHERE TRUE");

    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(industry_id) = query.industry_id {
        builder.push(" AND industry_id = ").push_bind(industry_id);
    }
    if let Some(start_date) = query.start_date {
        builder.push(" AND issue_date >= ").push_bind(start_date);
    }
    if let Some(end_date) = query.end_date {
        builder.push(" AND issue_date <= ").push_bind(end_date);
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (order_number ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR notes ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    builder.push(" ORDER BY issue_date DESC, created_at DESC");

    let sales = builder
        .build_query_as::<Sale>()
        .fetch_all(&state.db)
        .await?;

    Ok(Json(sales))
}

/// Get a sale with its line items
#[utoipa::path(
    get,
    path = "/api/v1/sales/{sale_id}",
    params(("sale_id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Sale detail", body = SaleWithItems),
        (status = 404, description = "Sale not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn get_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<SaleWithItems>> {
    let sale = fetch_sale(&state, sale_id).await?;
    let items = fetch_sale_items(&state, sale_id).await?;
    Ok(Json(SaleWithItems { sale, items }))
}

/// Update a draft sale, optionally replacing its full item list.
/// Invoiced sales are frozen; cancel the invoice first.
#[utoipa::path(
    put,
    path = "/api/v1/sales/{sale_id}",
    request_body = UpdateSaleRequest,
    params(("sale_id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Sale updated", body = SaleWithItems),
        (status = 404, description = "Sale not found"),
        (status = 422, description = "Sale is invoiced"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn update_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(body): Json<UpdateSaleRequest>,
) -> AppResult<Json<SaleWithItems>> {
    let sale = fetch_sale(&state, sale_id).await?;
    if sale.status.is_invoiced() {
        return Err(AppError::SaleAlreadyInvoiced);
    }

    let client_id = body.client_id.unwrap_or(sale.client_id);
    let representative_id = body.representative_id.unwrap_or(sale.representative_id);
    let industry_id = body.industry_id.unwrap_or(sale.industry_id);
    let order_type = body.order_type.unwrap_or(sale.order_type);
    let payment_terms = body.payment_terms.unwrap_or(sale.payment_terms);
    let issue_date = body.issue_date.unwrap_or(sale.issue_date);
    let expected_delivery = if body.clear_expected_delivery {
        None
    } else {
        body.expected_delivery.or(sale.expected_delivery)
    };
    let order_number = body.order_number.or(sale.order_number);
    let notes = body.notes.or(sale.notes);

    if order_type.trim().is_empty() {
        return Err(AppError::Validation("Order type is required".to_string()));
    }
    if payment_terms.trim().is_empty() {
        return Err(AppError::Validation("Payment terms are required".to_string()));
    }
    validate_dates(issue_date, expected_delivery)?;

    ensure_reference(&state, "clients", client_id, "Client").await?;
    ensure_reference(&state, "industries", industry_id, "Industry").await?;
    let representative = sqlx::query_as::<_, Representative>(
        "SELECT * FROM representatives WHERE id = $1",
    )
    .bind(representative_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        AppError::Validation(format!("Representative {} does not exist", representative_id))
    })?;

    // Replace the item list when one is supplied, otherwise keep the stored
    // lines and just re-roll the order totals from them.
    let (total_value, commission) = match body.items {
        Some(inputs) => {
            let rules = load_rules(&state, representative.id).await?;
            let items = prepare_items(
                &state,
                &inputs,
                industry_id,
                &representative,
                &rules,
                body.enable_pass_through,
            )
            .await?;

            sqlx::query("DELETE FROM sale_items WHERE sale_id = $1")
                .bind(sale_id)
                .execute(&state.db)
                .await?;
            insert_items(&state, sale_id, &items).await?;

            let lines: Vec<CartLine> = items.iter().map(|i| i.line.clone()).collect();
            let totals = cart_totals(&lines);
            (totals.grand_total, totals.total_commission)
        }
        None => {
            let stored = fetch_sale_items(&state, sale_id).await?;
            let lines: Vec<CartLine> = stored
                .iter()
                .filter(|i| !i.dropped)
                .map(|i| {
                    CartLine::new(i.quantity, i.unit_price, i.ipi_percent, i.commission_percent)
                })
                .collect();
            let totals = cart_totals(&lines);
            (totals.grand_total, totals.total_commission)
        }
    };

    let status = derive_status(issue_date, expected_delivery);

    let updated = sqlx::query_as::<_, Sale>(
        r#"UPDATE sales
           SET order_number = $1, client_id = $2, representative_id = $3, industry_id = $4,
               order_type = $5, payment_terms = $6, issue_date = $7, expected_delivery = $8,
               notes = $9, status = $10, total_value = $11, commission = $12, updated_at = NOW()
           WHERE id = $13
           RETURNING *"#,
    )
    .bind(&order_number)
    .bind(client_id)
    .bind(representative_id)
    .bind(industry_id)
    .bind(&order_type)
    .bind(&payment_terms)
    .bind(issue_date)
    .bind(expected_delivery)
    .bind(&notes)
    .bind(status)
    .bind(total_value)
    .bind(commission)
    .bind(sale_id)
    .fetch_one(&state.db)
    .await?;

    let items = fetch_sale_items(&state, sale_id).await?;
    Ok(Json(SaleWithItems {
        sale: updated,
        items,
    }))
}

/// Delete a draft sale and its items.
/// Invoiced sales cannot be deleted, only invoice-cancelled.
#[utoipa::path(
    delete,
    path = "/api/v1/sales/{sale_id}",
    params(("sale_id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Sale deleted"),
        (status = 404, description = "Sale not found"),
        (status = 422, description = "Sale is invoiced"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn delete_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let sale = fetch_sale(&state, sale_id).await?;
    if sale.status.is_invoiced() {
        return Err(AppError::SaleAlreadyInvoiced);
    }

    // Items first, then the sale itself
    sqlx::query("DELETE FROM sale_items WHERE sale_id = $1")
        .bind(sale_id)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM sales WHERE id = $1")
        .bind(sale_id)
        .execute(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "message": "Sale deleted successfully" })))
}

/// Mark items as dropped from an order without deleting them
#[utoipa::path(
    post,
    path = "/api/v1/sales/{sale_id}/items/drop",
    request_body = Vec<Uuid>,
    params(("sale_id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Items dropped"),
        (status = 404, description = "Sale not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn drop_sale_items(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(item_ids): Json<Vec<Uuid>>,
) -> AppResult<Json<serde_json::Value>> {
    let _ = fetch_sale(&state, sale_id).await?;

    sqlx::query(
        "UPDATE sale_items SET dropped = TRUE, updated_at = NOW() WHERE sale_id = $1 AND id = ANY($2)",
    )
    .bind(sale_id)
    .bind(&item_ids)
    .execute(&state.db)
    .await?;

    Ok(Json(serde_json::json!({ "message": "Items dropped successfully" })))
}

/// Invoice a sale.
/// Computes the billable total from the selected items, the Suframa discount
/// and the extra tax, records a receivable, and moves the sale to an invoiced
/// terminal status. Sales without catalog items bill the extra tax alone and
/// require a fiscal note number.
#[utoipa::path(
    post,
    path = "/api/v1/sales/{sale_id}/invoice",
    request_body = InvoiceSaleRequest,
    responses(
        (status = 200, description = "Sale invoiced", body = InvoiceSaleResponse),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Sale not found"),
        (status = 422, description = "Sale already invoiced"),
    ),
    params(("sale_id" = Uuid, Path, description = "Sale ID")),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn invoice_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(body): Json<InvoiceSaleRequest>,
) -> AppResult<Json<InvoiceSaleResponse>> {
    let sale = fetch_sale(&state, sale_id).await?;
    if sale.status.is_invoiced() {
        return Err(AppError::SaleAlreadyInvoiced);
    }

    if body.extra_tax < dec!(0) {
        return Err(AppError::Validation("Extra tax cannot be negative".to_string()));
    }
    if body.suframa < dec!(0) {
        return Err(AppError::Validation(
            "Suframa discount cannot be negative".to_string(),
        ));
    }

    let all_items = fetch_sale_items(&state, sale_id).await?;
    let billable: Vec<&SaleItem> = all_items.iter().filter(|i| !i.dropped).collect();
    let has_items = !billable.is_empty();

    let fiscal_note = body.fiscal_note.as_deref().map(str::trim).unwrap_or("");
    if !has_items && fiscal_note.is_empty() {
        return Err(AppError::Validation(
            "Sales without registered products require a fiscal note number".to_string(),
        ));
    }
    if has_items && body.items.is_empty() {
        return Err(AppError::Validation(
            "Select at least one item to invoice".to_string(),
        ));
    }

    let mut lines = Vec::with_capacity(body.items.len());
    let mut fully_billed = 0usize;
    for selection in &body.items {
        let item = billable
            .iter()
            .find(|i| i.id == selection.item_id)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Item {} does not belong to this sale",
                    selection.item_id
                ))
            })?;

        if selection.billed_quantity <= dec!(0) {
            return Err(AppError::Validation(
                "Billed quantity must be greater than zero".to_string(),
            ));
        }
        if selection.billed_quantity > item.quantity {
            return Err(AppError::Validation(format!(
                "Billed quantity exceeds the ordered quantity for item {}",
                item.id
            )));
        }
        if selection.billed_quantity == item.quantity {
            fully_billed += 1;
        }

        lines.push(InvoiceLine {
            billed_quantity: selection.billed_quantity,
            unit_price: item.unit_price,
        });
    }

    let totals = invoice_totals(&lines, body.suframa, body.extra_tax);

    // Full only when every billable item is invoiced at its full quantity
    let status = if !has_items
        || (body.items.len() == billable.len() && fully_billed == billable.len())
    {
        SaleStatus::InvoicedFull
    } else {
        SaleStatus::InvoicedPartial
    };

    let receivable_id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO receivables (
            id, sale_id, representative_id, amount_received, received_date, due_date,
            status, nfe, order_ref, industry_commission, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,'invoiced',$7,$8,0,NOW(),NOW())"#,
    )
    .bind(receivable_id)
    .bind(sale_id)
    .bind(sale.representative_id)
    .bind(totals.final_total)
    .bind(body.invoice_date)
    .bind(body.invoice_date)
    .bind(if fiscal_note.is_empty() {
        None
    } else {
        Some(fiscal_note.to_string())
    })
    .bind(&sale.order_number)
    .execute(&state.db)
    .await?;

    sqlx::query("UPDATE sales SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status)
        .bind(sale_id)
        .execute(&state.db)
        .await?;

    Ok(Json(InvoiceSaleResponse {
        sale_id,
        status,
        receivable_id,
        line_total: totals.line_total,
        suframa: body.suframa,
        after_discount: totals.after_discount,
        extra_tax: body.extra_tax,
        total_value: totals.final_total,
        formatted_total: format::format_currency(totals.final_total),
    }))
}

/// Cancel a sale's invoice.
/// Deletes the receivables recorded for the sale and returns it to Approved.
#[utoipa::path(
    delete,
    path = "/api/v1/sales/{sale_id}/invoice",
    params(("sale_id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Invoice cancelled"),
        (status = 404, description = "Sale not found"),
        (status = 422, description = "Sale is not invoiced"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sales"
)]
pub async fn cancel_invoice(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let sale = fetch_sale(&state, sale_id).await?;
    if !sale.status.is_invoiced() {
        return Err(AppError::SaleNotInvoiced);
    }

    // Receivables first, then the status reset
    let deleted = sqlx::query("DELETE FROM receivables WHERE sale_id = $1")
        .bind(sale_id)
        .execute(&state.db)
        .await?;
    if deleted.rows_affected() == 0 {
        warn!("No receivables found while cancelling invoice for sale {}", sale_id);
    }

    sqlx::query("UPDATE sales SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(SaleStatus::Approved)
        .bind(sale_id)
        .execute(&state.db)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Invoice cancelled; sale returned to approved status"
    })))
}
