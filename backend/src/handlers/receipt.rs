//! Receipt handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Receipt, ReceiptStatus};
use crate::services::receipt::{CreateReceiptInput, ReceiptListItem};
use crate::services::ReceiptService;
use crate::AppState;

/// Input for advancing a receipt's status
#[derive(Debug, Deserialize)]
pub struct UpdateReceiptStatusInput {
    pub status: ReceiptStatus,
}

/// List the owner's receipts, newest first
pub async fn list_receipts(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReceiptListItem>>> {
    let service = ReceiptService::new(state.db);
    let receipts = service.list(owner_id).await?;
    Ok(Json(receipts))
}

/// Record a receipt
pub async fn create_receipt(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(input): Json<CreateReceiptInput>,
) -> AppResult<Json<Receipt>> {
    let service = ReceiptService::new(state.db);
    let receipt = service.create(owner_id, input).await?;
    Ok(Json(receipt))
}

/// Advance a receipt's status
pub async fn update_receipt_status(
    State(state): State<AppState>,
    Path((owner_id, receipt_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateReceiptStatusInput>,
) -> AppResult<Json<Receipt>> {
    let service = ReceiptService::new(state.db);
    let receipt = service.mark_status(owner_id, receipt_id, input.status).await?;
    Ok(Json(receipt))
}
