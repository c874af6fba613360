// src/models/mod.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// ─── Clients ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub corporate_name: String,
    pub trade_name: String,
    pub cnpj: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub segment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClientRequest {
    pub corporate_name: String,
    pub trade_name: String,
    pub cnpj: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub segment: Option<String>,
}

// ─── Industries ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Industry {
    pub id: Uuid,
    pub name: String,
    pub cnpj: String,
    pub state: String,
    pub group_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIndustryRequest {
    pub name: String,
    pub cnpj: String,
    pub state: String,
    pub group_name: String,
}

// ─── Categories ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

// ─── Representatives ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Representative {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Master representatives always receive the full industry commission;
    /// the pass-through split never applies to them.
    pub is_master: bool,
    /// Identity-provider subject this representative signs in as, if any.
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRepresentativeRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_master: bool,
    pub user_id: Option<Uuid>,
}

// ─── Products ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub base_price: Option<Decimal>,
    pub ipi_percent: Option<Decimal>,
    pub ean: Option<String>,
    pub ncm: Option<String>,
    pub category_id: Option<Uuid>,
    pub industry_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub code: String,
    pub name: String,
    pub base_price: Option<Decimal>,
    pub ipi_percent: Option<Decimal>,
    pub ean: Option<String>,
    pub ncm: Option<String>,
    pub category_id: Option<Uuid>,
    pub industry_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Restrict the listing to one industry's catalog
    pub industry_id: Option<Uuid>,
}

// ─── Commission Rules ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "calculation_base", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CalculationBase {
    Product,
    Total,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CommissionRule {
    pub id: Uuid,
    pub representative_id: Uuid,
    /// Absent on the representative-wide fallback tier
    pub industry_id: Option<Uuid>,
    /// Absent unless the rule targets one product category
    pub category_id: Option<Uuid>,
    pub industry_percent: Decimal,
    pub pass_through_percent: Decimal,
    pub calculation_base: CalculationBase,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommissionRuleRequest {
    pub representative_id: Uuid,
    pub industry_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub industry_percent: Decimal,
    pub pass_through_percent: Decimal,
    pub calculation_base: CalculationBase,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveCommissionRequest {
    pub representative_id: Uuid,
    pub industry_id: Uuid,
    pub category_id: Option<Uuid>,
    pub base_value: Decimal,
    pub calculation_base: Option<CalculationBase>,
    #[serde(default)]
    pub enable_pass_through: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommissionOutcome {
    pub percent: Decimal,
    pub amount: Decimal,
    pub rule: Option<CommissionRule>,
}

// ─── Sales ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Approved,
    Scheduled,
    InvoicedFull,
    InvoicedPartial,
}

impl SaleStatus {
    pub fn is_invoiced(&self) -> bool {
        matches!(self, SaleStatus::InvoicedFull | SaleStatus::InvoicedPartial)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Sale {
    pub id: Uuid,
    pub order_number: Option<String>,
    pub client_id: Uuid,
    pub representative_id: Uuid,
    pub industry_id: Uuid,
    pub order_type: String,
    pub payment_terms: String,
    pub issue_date: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub notes: Option<String>,
    // Derived by the workflow, never settable directly
    pub status: SaleStatus,
    pub total_value: Decimal,
    pub commission: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub product_code: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub ipi_percent: Decimal,
    pub ipi_amount: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub commission_percent: Decimal,
    pub commission_amount: Decimal,
    /// Soft flag for items knocked off the order after booking
    pub dropped: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw line input; every derived field is recomputed server-side
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaleItemInput {
    pub product_id: Option<Uuid>,
    /// Required when no catalog product is referenced
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub quantity: Decimal,
    /// Defaults to the product's base price
    pub unit_price: Option<Decimal>,
    /// Defaults to the product's IPI percent
    pub ipi_percent: Option<Decimal>,
    /// Defaults to the resolved commission rule percent
    pub commission_percent: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub client_id: Uuid,
    pub representative_id: Uuid,
    pub industry_id: Uuid,
    pub order_type: String,
    pub payment_terms: String,
    pub issue_date: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub order_number: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItemInput>,
    /// Apply the pass-through percent when defaulting item commissions
    #[serde(default)]
    pub enable_pass_through: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSaleRequest {
    pub client_id: Option<Uuid>,
    pub representative_id: Option<Uuid>,
    pub industry_id: Option<Uuid>,
    pub order_type: Option<String>,
    pub payment_terms: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default)]
    pub clear_expected_delivery: bool,
    pub order_number: Option<String>,
    pub notes: Option<String>,
    /// When present, replaces the full item list
    pub items: Option<Vec<SaleItemInput>>,
    #[serde(default)]
    pub enable_pass_through: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSalesQuery {
    pub status: Option<SaleStatus>,
    pub industry_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Matches order number or notes, case-insensitive
    pub search: Option<String>,
}

// ─── Invoicing ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceItemSelection {
    pub item_id: Uuid,
    pub billed_quantity: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceSaleRequest {
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub extra_tax: Decimal,
    /// Suframa free-trade-zone benefit, a flat currency discount
    #[serde(default)]
    pub suframa: Decimal,
    /// Fiscal note number; mandatory for sales without catalog items
    pub fiscal_note: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceItemSelection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceSaleResponse {
    pub sale_id: Uuid,
    pub status: SaleStatus,
    pub receivable_id: Uuid,
    pub line_total: Decimal,
    pub suframa: Decimal,
    pub after_discount: Decimal,
    pub extra_tax: Decimal,
    pub total_value: Decimal,
    /// pt-BR rendering of total_value, e.g. "1.013,32"
    pub formatted_total: String,
}

// ─── Receivables ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Receivable {
    pub id: Uuid,
    pub sale_id: Option<Uuid>,
    pub representative_id: Uuid,
    pub amount_received: Decimal,
    pub received_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub nfe: Option<String>,
    pub order_ref: Option<String>,
    pub industry_commission: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReceivableRequest {
    pub amount_received: Option<Decimal>,
    pub received_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub nfe: Option<String>,
    pub order_ref: Option<String>,
    pub industry_commission: Option<Decimal>,
}

// ─── Auth / Admin Users ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: IdentityUser,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdentityUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Action-dispatch payload for the admin user-management endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminUserRequest {
    pub action: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "newRole")]
    pub new_role: Option<String>,
}
