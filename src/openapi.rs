// src/openapi.rs

use crate::models::{
    AdminUserRequest, CalculationBase, Category, Client, CommissionOutcome, CommissionRule,
    CreateCategoryRequest, CreateClientRequest, CreateCommissionRuleRequest,
    CreateIndustryRequest, CreateProductRequest, CreateRepresentativeRequest, CreateSaleRequest,
    IdentityUser, Industry, InvoiceItemSelection, InvoiceSaleRequest, InvoiceSaleResponse,
    LoginRequest, LoginResponse, Product, Receivable, Representative, ResolveCommissionRequest,
    Sale, SaleItem, SaleItemInput, SaleStatus, SaleWithItems, UpdateReceivableRequest,
    UpdateSaleRequest,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Commission System API",
        version = "1.0.0",
        description = "Back-office API for a sales representation office built with Rust and Axum. \
            Manages clients, industries, categories, representatives and products, books sales \
            with commission-rule resolution, and handles invoicing with Suframa discounts and \
            receivables tracking.",
        contact(
            name = "Commission System Support",
            email = "support@yourcompany.com"
        ),
        license(name = "MIT")
    ),
    paths(
        // Auth & Admin
        crate::handlers::auth_routes::login,
        crate::handlers::admin_users::admin_users,
        // Clients
        crate::handlers::clients::create_client,
        crate::handlers::clients::list_clients,
        crate::handlers::clients::get_client,
        crate::handlers::clients::update_client,
        crate::handlers::clients::delete_client,
        // Industries
        crate::handlers::industries::create_industry,
        crate::handlers::industries::list_industries,
        crate::handlers::industries::get_industry,
        crate::handlers::industries::update_industry,
        crate::handlers::industries::delete_industry,
        // Categories
        crate::handlers::categories::create_category,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        // Representatives
        crate::handlers::representatives::create_representative,
        crate::handlers::representatives::list_representatives,
        crate::handlers::representatives::get_representative,
        crate::handlers::representatives::update_representative,
        crate::handlers::representatives::delete_representative,
        // Products
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        // Commission Rules
        crate::handlers::commission_rules::create_commission_rule,
        crate::handlers::commission_rules::list_commission_rules,
        crate::handlers::commission_rules::update_commission_rule,
        crate::handlers::commission_rules::delete_commission_rule,
        crate::handlers::commission_rules::resolve_commission,
        // Sales
        crate::handlers::sales::create_sale,
        crate::handlers::sales::list_sales,
        crate::handlers::sales::get_sale,
        crate::handlers::sales::update_sale,
        crate::handlers::sales::delete_sale,
        crate::handlers::sales::drop_sale_items,
        crate::handlers::sales::invoice_sale,
        crate::handlers::sales::cancel_invoice,
        // Receivables
        crate::handlers::receivables::list_receivables,
        crate::handlers::receivables::get_receivable,
        crate::handlers::receivables::update_receivable,
        crate::handlers::receivables::delete_receivable,
    ),
    components(
        schemas(
            LoginRequest, LoginResponse, IdentityUser, AdminUserRequest,
            Client, CreateClientRequest,
            Industry, CreateIndustryRequest,
            Category, CreateCategoryRequest,
            Representative, CreateRepresentativeRequest,
            Product, CreateProductRequest,
            CommissionRule, CreateCommissionRuleRequest, CalculationBase,
            ResolveCommissionRequest, CommissionOutcome,
            Sale, SaleItem, SaleItemInput, SaleStatus, SaleWithItems,
            CreateSaleRequest, UpdateSaleRequest,
            InvoiceSaleRequest, InvoiceItemSelection, InvoiceSaleResponse,
            Receivable, UpdateReceivableRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Sign in through the identity provider"),
        (name = "Admin Users", description = "Manage application users"),
        (name = "Clients", description = "Client registry"),
        (name = "Industries", description = "Industries the office represents"),
        (name = "Categories", description = "Product categories"),
        (name = "Representatives", description = "Sales representatives and master flags"),
        (name = "Products", description = "Product catalog per industry"),
        (name = "Commission Rules", description = "Commission rules and resolution"),
        (name = "Sales", description = "Sales workflow: booking, invoicing, cancellation"),
        (name = "Receivables", description = "Amounts receivable created by invoicing"),
    )
)]
pub struct ApiDoc;
