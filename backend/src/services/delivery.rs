//! Delivery service: goods-out records
//!
//! Creating a delivery decrements the product's stock counter immediately,
//! clamped at zero. The insert and the decrement run in one transaction with
//! the product row locked, so concurrent deliveries cannot lose updates.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    quantity_after_delivery, Delivery, DeliveryStatus, OperationKind, ProductRef, UnknownStatus,
};
use crate::services::reference::allocate_reference;
use shared::validation::{validate_quantity, validate_required_text};

/// Delivery service
#[derive(Clone)]
pub struct DeliveryService {
    db: PgPool,
}

/// Input for recording a delivery
#[derive(Debug, Deserialize)]
pub struct CreateDeliveryInput {
    pub product_id: Uuid,
    pub customer: String,
    pub quantity: i32,
    pub date: DateTime<Utc>,
}

/// A delivery with its product attached, for listings
#[derive(Debug, Serialize)]
pub struct DeliveryListItem {
    pub id: Uuid,
    pub reference: String,
    pub customer: String,
    pub quantity: i32,
    pub status: DeliveryStatus,
    pub date: DateTime<Utc>,
    pub product: ProductRef,
}

/// Delivery row
#[derive(Debug, FromRow)]
struct DeliveryRow {
    id: Uuid,
    owner_id: Uuid,
    product_id: Uuid,
    reference: String,
    customer: String,
    quantity: i32,
    status: String,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl DeliveryRow {
    fn into_model(self) -> Result<Delivery, UnknownStatus> {
        Ok(Delivery {
            id: self.id,
            owner_id: self.owner_id,
            product_id: self.product_id,
            reference: self.reference,
            customer: self.customer,
            quantity: self.quantity,
            status: DeliveryStatus::from_str(&self.status)?,
            date: self.date,
            created_at: self.created_at,
        })
    }
}

/// Row for the listing query, delivery joined to its product
#[derive(Debug, FromRow)]
struct DeliveryListRow {
    id: Uuid,
    reference: String,
    customer: String,
    quantity: i32,
    status: String,
    date: DateTime<Utc>,
    product_id: Uuid,
    product_name: String,
    product_sku: String,
}

const DELIVERY_COLUMNS: &str =
    "id, owner_id, product_id, reference, customer, quantity, status, date, created_at";

impl DeliveryService {
    /// Create a new DeliveryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a delivery in `Draft` status and decrement the product's stock,
    /// clamping at zero
    pub async fn create(&self, owner_id: Uuid, input: CreateDeliveryInput) -> AppResult<Delivery> {
        validate_required_text(&input.customer).map_err(|msg| AppError::Validation {
            field: "customer".to_string(),
            message: msg.to_string(),
        })?;
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let on_hand = sqlx::query_scalar::<_, i32>(
            "SELECT quantity FROM products WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(input.product_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let reference =
            allocate_reference(&mut tx, owner_id, OperationKind::Delivery, input.date).await?;

        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            r#"
            INSERT INTO deliveries (owner_id, product_id, reference, customer, quantity, status, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {DELIVERY_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(input.product_id)
        .bind(&reference)
        .bind(&input.customer)
        .bind(input.quantity)
        .bind(DeliveryStatus::Draft.as_str())
        .bind(input.date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET quantity = $1 WHERE id = $2")
            .bind(quantity_after_delivery(on_hand, input.quantity))
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into_model()?)
    }

    /// List the owner's deliveries with products attached, newest first
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<DeliveryListItem>> {
        let rows = sqlx::query_as::<_, DeliveryListRow>(
            r#"
            SELECT d.id, d.reference, d.customer, d.quantity, d.status, d.date,
                   p.id AS product_id, p.name AS product_name, p.sku AS product_sku
            FROM deliveries d
            JOIN products p ON p.id = d.product_id
            WHERE d.owner_id = $1
            ORDER BY d.date DESC, d.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(DeliveryListItem {
                    id: r.id,
                    reference: r.reference,
                    customer: r.customer,
                    quantity: r.quantity,
                    status: DeliveryStatus::from_str(&r.status)?,
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

    /// Advance a delivery through its status machine; stock was already
    /// decremented at creation, so no transition touches it again
    pub async fn mark_status(
        &self,
        owner_id: Uuid,
        delivery_id: Uuid,
        next: DeliveryStatus,
    ) -> AppResult<Delivery> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, DeliveryRow>(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE id = $1 AND owner_id = $2 FOR UPDATE"
        ))
        .bind(delivery_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Delivery".to_string()))?;

        let current = DeliveryStatus::from_str(&row.status)?;
        let next = current.transition_to(next)?;

        let updated = sqlx::query_as::<_, DeliveryRow>(&format!(
            "UPDATE deliveries SET status = $1 WHERE id = $2 RETURNING {DELIVERY_COLUMNS}"
        ))
        .bind(next.as_str())
        .bind(delivery_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated.into_model()?)
    }
}
