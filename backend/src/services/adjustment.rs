//! Adjustment service: stock corrections from physical counts
//!
//! The caller submits the counted quantity; the service records the signed
//! change against the running counter and overwrites the counter to the
//! counted value in the same transaction.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    adjustment_change, Adjustment, AdjustmentStatus, OperationKind, ProductRef, UnknownStatus,
};
use crate::services::reference::allocate_reference;
use shared::validation::{validate_counted_quantity, validate_required_text};

/// Adjustment service
#[derive(Clone)]
pub struct AdjustmentService {
    db: PgPool,
}

/// Input for recording an adjustment
#[derive(Debug, Deserialize)]
pub struct CreateAdjustmentInput {
    pub product_id: Uuid,
    /// Stock level found by the physical count
    pub counted_quantity: i32,
    pub reason: String,
    /// Defaults to the current time when absent
    pub date: Option<DateTime<Utc>>,
}

/// An adjustment with its product attached, for listings
#[derive(Debug, Serialize)]
pub struct AdjustmentListItem {
    pub id: Uuid,
    pub reference: String,
    pub change: i32,
    pub reason: String,
    pub status: AdjustmentStatus,
    pub date: DateTime<Utc>,
    pub product: ProductRef,
}

/// Adjustment row
#[derive(Debug, FromRow)]
struct AdjustmentRow {
    id: Uuid,
    owner_id: Uuid,
    product_id: Uuid,
    reference: String,
    change: i32,
    reason: String,
    status: String,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl AdjustmentRow {
    fn into_model(self) -> Result<Adjustment, UnknownStatus> {
        Ok(Adjustment {
            id: self.id,
            owner_id: self.owner_id,
            product_id: self.product_id,
            reference: self.reference,
            change: self.change,
            reason: self.reason,
            status: AdjustmentStatus::from_str(&self.status)?,
            date: self.date,
            created_at: self.created_at,
        })
    }
}

/// Row for the listing query, adjustment joined to its product
#[derive(Debug, FromRow)]
struct AdjustmentListRow {
    id: Uuid,
    reference: String,
    change: i32,
    reason: String,
    status: String,
    date: DateTime<Utc>,
    product_id: Uuid,
    product_name: String,
    product_sku: String,
}

const ADJUSTMENT_COLUMNS: &str =
    "id, owner_id, product_id, reference, change, reason, status, date, created_at";

impl AdjustmentService {
    /// Create a new AdjustmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record an adjustment and overwrite the product's stock counter with
    /// the counted value
    pub async fn create(
        &self,
        owner_id: Uuid,
        input: CreateAdjustmentInput,
    ) -> AppResult<Adjustment> {
        validate_counted_quantity(input.counted_quantity).map_err(|msg| {
            AppError::Validation {
                field: "counted_quantity".to_string(),
                message: msg.to_string(),
            }
        })?;
        validate_required_text(&input.reason).map_err(|msg| AppError::Validation {
            field: "reason".to_string(),
            message: msg.to_string(),
        })?;

        let date = input.date.unwrap_or_else(Utc::now);

        let mut tx = self.db.begin().await?;

        let on_hand = sqlx::query_scalar::<_, i32>(
            "SELECT quantity FROM products WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(input.product_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let change = adjustment_change(input.counted_quantity, on_hand);
        let reference =
            allocate_reference(&mut tx, owner_id, OperationKind::Adjustment, date).await?;

        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            r#"
            INSERT INTO adjustments (owner_id, product_id, reference, change, reason, status, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ADJUSTMENT_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(input.product_id)
        .bind(&reference)
        .bind(change)
        .bind(&input.reason)
        .bind(AdjustmentStatus::Completed.as_str())
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET quantity = $1 WHERE id = $2")
            .bind(input.counted_quantity)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into_model()?)
    }

    /// List the owner's adjustments with products attached, newest first
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<AdjustmentListItem>> {
        let rows = sqlx::query_as::<_, AdjustmentListRow>(
            r#"
            SELECT a.id, a.reference, a.change, a.reason, a.status, a.date,
                   p.id AS product_id, p.name AS product_name, p.sku AS product_sku
            FROM adjustments a
            JOIN products p ON p.id = a.product_id
            WHERE a.owner_id = $1
            ORDER BY a.date DESC, a.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(AdjustmentListItem {
                    id: r.id,
                    reference: r.reference,
                    change: r.change,
                    reason: r.reason,
                    status: AdjustmentStatus::from_str(&r.status)?,
                    date: r.date,
                    product: ProductRef {
                        id: r.product_id,
                        name: r.product_name,
                        sku: r.product_sku,
                    },
                })
            })
            .collect()
    }
}
