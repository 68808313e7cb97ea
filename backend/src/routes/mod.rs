//! Route definitions for StockMaster
//!
//! Every list/create route embeds the owner identifier in the path; all
//! queries behind it are scoped to that owner.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Auth routes
        .nest("/auth", auth_routes())
        // Dashboard
        .nest("/dashboard", dashboard_routes())
        // Products
        .nest("/products", product_routes())
        // Receipts
        .nest("/receipts", receipt_routes())
        // Deliveries
        .nest("/deliveries", delivery_routes())
        // Transfers
        .nest("/transfers", transfer_routes())
        // Adjustments
        .nest("/adjustments", adjustment_routes())
        // Ledger (full operations timeline)
        .nest("/ledger", ledger_routes())
}

/// Account registration and sign-in
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/signin", post(handlers::sign_in))
}

/// Aggregated dashboard view
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/:owner_id", get(handlers::get_dashboard))
}

/// Product management routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/details/:product_id", get(handlers::get_product_details))
        .route(
            "/:owner_id",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/:owner_id/:product_id", put(handlers::update_product))
}

/// Receipt management routes
fn receipt_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:owner_id",
            get(handlers::list_receipts).post(handlers::create_receipt),
        )
        .route(
            "/:owner_id/:receipt_id/status",
            post(handlers::update_receipt_status),
        )
}

/// Delivery management routes
fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:owner_id",
            get(handlers::list_deliveries).post(handlers::create_delivery),
        )
        .route(
            "/:owner_id/:delivery_id/status",
            post(handlers::update_delivery_status),
        )
}

/// Transfer management routes
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:owner_id",
            get(handlers::list_transfers).post(handlers::create_transfer),
        )
        .route(
            "/:owner_id/:transfer_id/status",
            post(handlers::update_transfer_status),
        )
}

/// Adjustment management routes
fn adjustment_routes() -> Router<AppState> {
    Router::new().route(
        "/:owner_id",
        get(handlers::list_adjustments).post(handlers::create_adjustment),
    )
}

/// Full operations timeline
fn ledger_routes() -> Router<AppState> {
    Router::new().route("/:owner_id", get(handlers::get_ledger))
}
