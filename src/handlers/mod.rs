pub mod admin_users;
pub mod auth_routes;
pub mod categories;
pub mod clients;
pub mod commission_rules;
pub mod general;
pub mod industries;
pub mod products;
pub mod receivables;
pub mod representatives;
pub mod sales;
