//! Adjustment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Adjustment;
use crate::services::adjustment::{AdjustmentListItem, CreateAdjustmentInput};
use crate::services::AdjustmentService;
use crate::AppState;

/// List the owner's adjustments, newest first
pub async fn list_adjustments(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<AdjustmentListItem>>> {
    let service = AdjustmentService::new(state.db);
    let adjustments = service.list(owner_id).await?;
    Ok(Json(adjustments))
}

/// Record an adjustment; overwrites the product's stock with the counted value
pub async fn create_adjustment(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(input): Json<CreateAdjustmentInput>,
) -> AppResult<Json<Adjustment>> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.create(owner_id, input).await?;
    Ok(Json(adjustment))
}
