//! Product handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Product, ProductOverview};
use crate::services::product::{CreateProductInput, UpdateProductInput};
use crate::services::ProductService;
use crate::AppState;

/// List the owner's products with derived stock status and location
pub async fn list_products(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductOverview>>> {
    let service = ProductService::new(state.db);
    let products = service.list_overview(owner_id).await?;
    Ok(Json(products))
}

/// Create a product for the owner
pub async fn create_product(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.create(owner_id, input).await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path((owner_id, product_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(owner_id, product_id, input).await?;
    Ok(Json(product))
}

/// Fetch a single product as a structured payload
pub async fn get_product_details(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}
