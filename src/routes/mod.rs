// src/routes/mod.rs

use crate::{
    handlers::{
        admin_users::admin_users,
        auth_routes::login,
        categories::{
            create_category, delete_category, get_category, list_categories, update_category,
        },
        clients::{create_client, delete_client, get_client, list_clients, update_client},
        commission_rules::{
            create_commission_rule, delete_commission_rule, list_commission_rules,
            resolve_commission, update_commission_rule,
        },
        industries::{
            create_industry, delete_industry, get_industry, list_industries, update_industry,
        },
        products::{create_product, delete_product, get_product, list_products, update_product},
        receivables::{
            delete_receivable, get_receivable, list_receivables, update_receivable,
        },
        representatives::{
            create_representative, delete_representative, get_representative,
            list_representatives, update_representative,
        },
        sales::{
            cancel_invoice, create_sale, delete_sale, drop_sale_items, get_sale, invoice_sale,
            list_sales, update_sale,
        },
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // ─── Auth & Admin ─────────────────────────────────────
        .route("/auth/login", post(login))
        .route("/admin/users", post(admin_users))
        // ─── Clients ──────────────────────────────────────────
        .route("/clients", post(create_client).get(list_clients))
        .route(
            "/clients/{client_id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        // ─── Industries ───────────────────────────────────────
        .route("/industries", post(create_industry).get(list_industries))
        .route(
            "/industries/{industry_id}",
            get(get_industry).put(update_industry).delete(delete_industry),
        )
        // ─── Categories ───────────────────────────────────────
        .route("/categories", post(create_category).get(list_categories))
        .route(
            "/categories/{category_id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        // ─── Representatives ──────────────────────────────────
        .route(
            "/representatives",
            post(create_representative).get(list_representatives),
        )
        .route(
            "/representatives/{representative_id}",
            get(get_representative)
                .put(update_representative)
                .delete(delete_representative),
        )
        // ─── Products ─────────────────────────────────────────
        .route("/products", post(create_product).get(list_products))
        .route(
            "/products/{product_id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // ─── Commission Rules ─────────────────────────────────
        .route(
            "/commission-rules",
            post(create_commission_rule).get(list_commission_rules),
        )
        .route("/commission-rules/resolve", post(resolve_commission))
        .route(
            "/commission-rules/{rule_id}",
            put(update_commission_rule).delete(delete_commission_rule),
        )
        // ─── Sales ────────────────────────────────────────────
        .route("/sales", post(create_sale).get(list_sales))
        .route(
            "/sales/{sale_id}",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
        .route("/sales/{sale_id}/items/drop", post(drop_sale_items))
        .route(
            "/sales/{sale_id}/invoice",
            post(invoice_sale).delete(cancel_invoice),
        )
        // ─── Receivables ──────────────────────────────────────
        .route("/receivables", get(list_receivables))
        .route(
            "/receivables/{receivable_id}",
            get(get_receivable)
                .patch(update_receivable)
                .delete(delete_receivable),
        )
}
