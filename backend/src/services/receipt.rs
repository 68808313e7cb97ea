//! Receipt service: goods-in records
//!
//! Receipts are created in `Waiting` status and do not touch stock until they
//! are marked `Received`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{OperationKind, ProductRef, Receipt, ReceiptStatus, UnknownStatus};
use crate::services::reference::allocate_reference;
use shared::validation::{validate_quantity, validate_required_text};

/// Receipt service
#[derive(Clone)]
pub struct ReceiptService {
    db: PgPool,
}

/// Input for recording a receipt
#[derive(Debug, Deserialize)]
pub struct CreateReceiptInput {
    pub product_id: Uuid,
    pub supplier: String,
    pub quantity: i32,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    /// Client-supplied reference; generated when absent
    pub reference: Option<String>,
}

/// A receipt with its product attached, for listings
#[derive(Debug, Serialize)]
pub struct ReceiptListItem {
    pub id: Uuid,
    pub reference: String,
    pub supplier: String,
    pub quantity: i32,
    pub status: ReceiptStatus,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub product: ProductRef,
}

/// Receipt row
#[derive(Debug, FromRow)]
struct ReceiptRow {
    id: Uuid,
    owner_id: Uuid,
    product_id: Uuid,
    reference: String,
    supplier: String,
    quantity: i32,
    status: String,
    date: DateTime<Utc>,
    notes: String,
    created_at: DateTime<Utc>,
}

impl ReceiptRow {
    fn into_model(self) -> Result<Receipt, UnknownStatus> {
        Ok(Receipt {
            id: self.id,
            owner_id: self.owner_id,
            product_id: self.product_id,
            reference: self.reference,
            supplier: self.supplier,
            quantity: self.quantity,
            status: ReceiptStatus::from_str(&self.status)?,
            date: self.date,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Row for the listing query, receipt joined to its product
#[derive(Debug, FromRow)]
struct ReceiptListRow {
    id: Uuid,
    reference: String,
    supplier: String,
    quantity: i32,
    status: String,
    date: DateTime<Utc>,
    notes: String,
    product_id: Uuid,
    product_name: String,
    product_sku: String,
}

const RECEIPT_COLUMNS: &str =
    "id, owner_id, product_id, reference, supplier, quantity, status, date, notes, created_at";

impl ReceiptService {
    /// Create a new ReceiptService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a receipt in `Waiting` status
    pub async fn create(&self, owner_id: Uuid, input: CreateReceiptInput) -> AppResult<Receipt> {
        validate_required_text(&input.supplier).map_err(|msg| AppError::Validation {
            field: "supplier".to_string(),
            message: msg.to_string(),
        })?;
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

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

        let reference = match input.reference {
            Some(reference) if !reference.trim().is_empty() => reference,
            _ => {
                allocate_reference(&mut tx, owner_id, OperationKind::Receipt, input.date).await?
            }
        };

        let row = sqlx::query_as::<_, ReceiptRow>(&format!(
            r#"
            INSERT INTO receipts (owner_id, product_id, reference, supplier, quantity, status, date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {RECEIPT_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(input.product_id)
        .bind(&reference)
        .bind(&input.supplier)
        .bind(input.quantity)
        .bind(ReceiptStatus::Waiting.as_str())
        .bind(input.date)
        .bind(input.notes.unwrap_or_default())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_model()?)
    }

    /// List the owner's receipts with products attached, newest first
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<ReceiptListItem>> {
        let rows = sqlx::query_as::<_, ReceiptListRow>(
            r#"
            SELECT r.id, r.reference, r.supplier, r.quantity, r.status, r.date, r.notes,
                   p.id AS product_id, p.name AS product_name, p.sku AS product_sku
            FROM receipts r
            JOIN products p ON p.id = r.product_id
            WHERE r.owner_id = $1
            ORDER BY r.date DESC, r.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(ReceiptListItem {
                    id: r.id,
                    reference: r.reference,
                    supplier: r.supplier,
                    quantity: r.quantity,
                    status: ReceiptStatus::from_str(&r.status)?,
                    date: r.date,
                    notes: r.notes,
                    product: ProductRef {
                        id: r.product_id,
                        name: r.product_name,
                        sku: r.product_sku,
                    },
                })
            })
            .collect()
    }

    /// Advance a receipt through its status machine.
    ///
    /// Marking a receipt `Received` adds its quantity to the product's stock
    /// counter in the same transaction; no other transition touches stock.
    pub async fn mark_status(
        &self,
        owner_id: Uuid,
        receipt_id: Uuid,
        next: ReceiptStatus,
    ) -> AppResult<Receipt> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ReceiptRow>(&format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = $1 AND owner_id = $2 FOR UPDATE"
        ))
        .bind(receipt_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Receipt".to_string()))?;

        let current = ReceiptStatus::from_str(&row.status)?;
        let next = current.transition_to(next)?;

        let updated = sqlx::query_as::<_, ReceiptRow>(&format!(
            "UPDATE receipts SET status = $1 WHERE id = $2 RETURNING {RECEIPT_COLUMNS}"
        ))
        .bind(next.as_str())
        .bind(receipt_id)
        .fetch_one(&mut *tx)
        .await?;

        if next == ReceiptStatus::Received {
            sqlx::query("UPDATE products SET quantity = quantity + $1 WHERE id = $2")
                .bind(row.quantity)
                .bind(row.product_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(updated.into_model()?)
    }
}
