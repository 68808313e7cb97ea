//! Dashboard and ledger handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::OperationEntry;
use crate::services::dashboard::DashboardSummary;
use crate::services::DashboardService;
use crate::AppState;

/// Aggregated dashboard for an owner
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<DashboardSummary>> {
    let service = DashboardService::new(state.db);
    let summary = service.summary(owner_id).await?;
    Ok(Json(summary))
}

/// Full operations timeline for an owner
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<OperationEntry>>> {
    let service = DashboardService::new(state.db);
    let entries = service.ledger(owner_id).await?;
    Ok(Json(entries))
}
