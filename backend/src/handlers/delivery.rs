//! Delivery handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Delivery, DeliveryStatus};
use crate::services::delivery::{CreateDeliveryInput, DeliveryListItem};
use crate::services::DeliveryService;
use crate::AppState;

/// Input for advancing a delivery's status
#[derive(Debug, Deserialize)]
pub struct UpdateDeliveryStatusInput {
    pub status: DeliveryStatus,
}

/// List the owner's deliveries, newest first
pub async fn list_deliveries(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<DeliveryListItem>>> {
    let service = DeliveryService::new(state.db);
    let deliveries = service.list(owner_id).await?;
    Ok(Json(deliveries))
}

/// Record a delivery; decrements the product's stock
pub async fn create_delivery(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(input): Json<CreateDeliveryInput>,
) -> AppResult<Json<Delivery>> {
    let service = DeliveryService::new(state.db);
    let delivery = service.create(owner_id, input).await?;
    Ok(Json(delivery))
}

/// Advance a delivery's status
pub async fn update_delivery_status(
    State(state): State<AppState>,
    Path((owner_id, delivery_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateDeliveryStatusInput>,
) -> AppResult<Json<Delivery>> {
    let service = DeliveryService::new(state.db);
    let delivery = service
        .mark_status(owner_id, delivery_id, input.status)
        .await?;
    Ok(Json(delivery))
}
