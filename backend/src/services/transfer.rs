//! Transfer service: internal stock movements
//!
//! Transfers never mutate the stock counter. Their only derived effect is the
//! product's current location, read as the destination of the latest transfer.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{OperationKind, ProductRef, Transfer, TransferStatus, UnknownStatus};
use crate::services::reference::allocate_reference;
use shared::validation::{validate_quantity, validate_required_text};

/// Transfer service
#[derive(Clone)]
pub struct TransferService {
    db: PgPool,
}

/// Input for recording a transfer
#[derive(Debug, Deserialize)]
pub struct CreateTransferInput {
    pub product_id: Uuid,
    pub from_location: String,
    pub to_location: String,
    pub quantity: i32,
    /// Defaults to the current time when absent
    pub date: Option<DateTime<Utc>>,
}

/// A transfer with its product attached, for listings
#[derive(Debug, Serialize)]
pub struct TransferListItem {
    pub id: Uuid,
    pub reference: String,
    pub from_location: String,
    pub to_location: String,
    pub quantity: i32,
    pub status: TransferStatus,
    pub date: DateTime<Utc>,
    pub product: ProductRef,
}

/// Transfer row
#[derive(Debug, FromRow)]
struct TransferRow {
    id: Uuid,
    owner_id: Uuid,
    product_id: Uuid,
    reference: String,
    from_location: String,
    to_location: String,
    quantity: i32,
    status: String,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TransferRow {
    fn into_model(self) -> Result<Transfer, UnknownStatus> {
        Ok(Transfer {
            id: self.id,
            owner_id: self.owner_id,
            product_id: self.product_id,
            reference: self.reference,
            from_location: self.from_location,
            to_location: self.to_location,
            quantity: self.quantity,
            status: TransferStatus::from_str(&self.status)?,
            date: self.date,
            created_at: self.created_at,
        })
    }
}

/// Row for the listing query, transfer joined to its product
#[derive(Debug, FromRow)]
struct TransferListRow {
    id: Uuid,
    reference: String,
    from_location: String,
    to_location: String,
    quantity: i32,
    status: String,
    date: DateTime<Utc>,
    product_id: Uuid,
    product_name: String,
    product_sku: String,
}

const TRANSFER_COLUMNS: &str =
    "id, owner_id, product_id, reference, from_location, to_location, quantity, status, date, created_at";

impl TransferService {
    /// Create a new TransferService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a transfer in `Waiting` status
    pub async fn create(&self, owner_id: Uuid, input: CreateTransferInput) -> AppResult<Transfer> {
        validate_required_text(&input.from_location).map_err(|msg| AppError::Validation {
            field: "from_location".to_string(),
            message: msg.to_string(),
        })?;
        validate_required_text(&input.to_location).map_err(|msg| AppError::Validation {
            field: "to_location".to_string(),
            message: msg.to_string(),
        })?;
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        let date = input.date.unwrap_or_else(Utc::now);

        let mut tx = self.db.begin().await?;

        // Validate the product belongs to the owner
        let product_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND owner_id = $2)",
        )
        .bind(input.product_id)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;
        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let reference =
            allocate_reference(&mut tx, owner_id, OperationKind::Transfer, date).await?;

        let row = sqlx::query_as::<_, TransferRow>(&format!(
            r#"
            INSERT INTO transfers (owner_id, product_id, reference, from_location, to_location, quantity, status, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TRANSFER_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(input.product_id)
        .bind(&reference)
        .bind(&input.from_location)
        .bind(&input.to_location)
        .bind(input.quantity)
        .bind(TransferStatus::Waiting.as_str())
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_model()?)
    }

    /// List the owner's transfers with products attached, newest first
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<TransferListItem>> {
        let rows = sqlx::query_as::<_, TransferListRow>(
            r#"
            SELECT t.id, t.reference, t.from_location, t.to_location, t.quantity, t.status, t.date,
                   p.id AS product_id, p.name AS product_name, p.sku AS product_sku
            FROM transfers t
            JOIN products p ON p.id = t.product_id
            WHERE t.owner_id = $1
            ORDER BY t.date DESC, t.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(TransferListItem {
                    id: r.id,
                    reference: r.reference,
                    from_location: r.from_location,
                    to_location: r.to_location,
                    quantity: r.quantity,
                    status: TransferStatus::from_str(&r.status)?,
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

    /// Advance a transfer through its status machine
    pub async fn mark_status(
        &self,
        owner_id: Uuid,
        transfer_id: Uuid,
        next: TransferStatus,
    ) -> AppResult<Transfer> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, TransferRow>(&format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfers WHERE id = $1 AND owner_id = $2 FOR UPDATE"
        ))
        .bind(transfer_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer".to_string()))?;

        let current = TransferStatus::from_str(&row.status)?;
        let next = current.transition_to(next)?;

        let updated = sqlx::query_as::<_, TransferRow>(&format!(
            "UPDATE transfers SET status = $1 WHERE id = $2 RETURNING {TRANSFER_COLUMNS}"
        ))
        .bind(next.as_str())
        .bind(transfer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated.into_model()?)
    }
}
