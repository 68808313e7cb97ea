//! Dashboard and ledger read models
//!
//! The operations timeline is projected from the per-type tables at query
//! time with a `UNION ALL`; there is no stored operations log to drift out of
//! sync with the records it summarizes.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    DeliveryStatus, OperationEntry, OperationKind, ProductRef, ReceiptStatus,
};

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Aggregated dashboard view for one owner
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub pending_receipts: i64,
    pub pending_deliveries: i64,
    pub internal_transfers: i64,
    pub operations: Vec<OperationEntry>,
}

/// Row for the timeline projection
#[derive(Debug, FromRow)]
struct OperationRow {
    id: Uuid,
    kind: String,
    reference: String,
    quantity: i32,
    status: String,
    date: chrono::DateTime<chrono::Utc>,
    product_id: Uuid,
    product_name: String,
    product_sku: String,
}

/// Deliveries, transfers and adjustments; the adjustment arm carries the
/// signed change as its quantity.
const TIMELINE_ARMS: &str = r#"
    SELECT d.id, 'delivery' AS kind, d.reference, d.quantity, d.status, d.date,
           p.id AS product_id, p.name AS product_name, p.sku AS product_sku
    FROM deliveries d
    JOIN products p ON p.id = d.product_id
    WHERE d.owner_id = $1
    UNION ALL
    SELECT t.id, 'transfer' AS kind, t.reference, t.quantity, t.status, t.date,
           p.id AS product_id, p.name AS product_name, p.sku AS product_sku
    FROM transfers t
    JOIN products p ON p.id = t.product_id
    WHERE t.owner_id = $1
    UNION ALL
    SELECT a.id, 'adjustment' AS kind, a.reference, a.change AS quantity, a.status, a.date,
           p.id AS product_id, p.name AS product_name, p.sku AS product_sku
    FROM adjustments a
    JOIN products p ON p.id = a.product_id
    WHERE a.owner_id = $1
"#;

const RECEIPT_ARM: &str = r#"
    UNION ALL
    SELECT r.id, 'receipt' AS kind, r.reference, r.quantity, r.status, r.date,
           p.id AS product_id, p.name AS product_name, p.sku AS product_sku
    FROM receipts r
    JOIN products p ON p.id = r.product_id
    WHERE r.owner_id = $1
"#;

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Aggregate the owner's dashboard: counts plus the combined
    /// delivery/transfer/adjustment timeline, newest first
    pub async fn summary(&self, owner_id: Uuid) -> AppResult<DashboardSummary> {
        let total_products =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.db)
                .await?;

        let pending_receipts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM receipts WHERE owner_id = $1 AND status <> $2",
        )
        .bind(owner_id)
        .bind(ReceiptStatus::Received.as_str())
        .fetch_one(&self.db)
        .await?;

        let pending_deliveries = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM deliveries WHERE owner_id = $1 AND status <> $2",
        )
        .bind(owner_id)
        .bind(DeliveryStatus::Delivered.as_str())
        .fetch_one(&self.db)
        .await?;

        let internal_transfers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transfers WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.db)
                .await?;

        let operations = self.timeline(owner_id, false).await?;

        Ok(DashboardSummary {
            total_products,
            pending_receipts,
            pending_deliveries,
            internal_transfers,
            operations,
        })
    }

    /// Full operations timeline across all four record types, newest first
    pub async fn ledger(&self, owner_id: Uuid) -> AppResult<Vec<OperationEntry>> {
        self.timeline(owner_id, true).await
    }

    async fn timeline(
        &self,
        owner_id: Uuid,
        with_receipts: bool,
    ) -> AppResult<Vec<OperationEntry>> {
        let query = if with_receipts {
            format!("SELECT * FROM ({TIMELINE_ARMS} {RECEIPT_ARM}) ops ORDER BY date DESC, id")
        } else {
            format!("SELECT * FROM ({TIMELINE_ARMS}) ops ORDER BY date DESC, id")
        };

        let rows = sqlx::query_as::<_, OperationRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.db)
            .await?;

        rows.into_iter()
            .map(|r| {
                let kind = OperationKind::parse(&r.kind)
                    .ok_or_else(|| AppError::Internal(format!("unknown operation kind: {}", r.kind)))?;
                Ok(OperationEntry {
                    id: r.id,
                    kind,
                    reference: r.reference,
                    product: ProductRef {
                        id: r.product_id,
                        name: r.product_name,
                        sku: r.product_sku,
                    },
                    quantity: r.quantity,
                    status: r.status,
                    date: r.date,
                })
            })
            .collect()
    }
}
