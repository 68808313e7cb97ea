//! Transfer handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Transfer, TransferStatus};
use crate::services::transfer::{CreateTransferInput, TransferListItem};
use crate::services::TransferService;
use crate::AppState;

/// Input for advancing a transfer's status
#[derive(Debug, Deserialize)]
pub struct UpdateTransferStatusInput {
    pub status: TransferStatus,
}

/// List the owner's transfers, newest first
pub async fn list_transfers(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<TransferListItem>>> {
    let service = TransferService::new(state.db);
    let transfers = service.list(owner_id).await?;
    Ok(Json(transfers))
}

/// Record a transfer; never touches stock
pub async fn create_transfer(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(input): Json<CreateTransferInput>,
) -> AppResult<Json<Transfer>> {
    let service = TransferService::new(state.db);
    let transfer = service.create(owner_id, input).await?;
    Ok(Json(transfer))
}

/// Advance a transfer's status
pub async fn update_transfer_status(
    State(state): State<AppState>,
    Path((owner_id, transfer_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateTransferStatusInput>,
) -> AppResult<Json<Transfer>> {
    let service = TransferService::new(state.db);
    let transfer = service
        .mark_status(owner_id, transfer_id, input.status)
        .await?;
    Ok(Json(transfer))
}
