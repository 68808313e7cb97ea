//! Product model and stock derivations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Location label reported for a product that has never been transferred.
pub const DEFAULT_LOCATION: &str = "Warehouse A";

/// A stocked product owned by one admin.
///
/// `quantity` is the canonical on-hand counter. Every write path (deliveries,
/// adjustments, received receipts) goes through this one field and keeps it
/// non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub low_stock_limit: i32,
    pub created_at: DateTime<Utc>,
}

/// Derived stock level indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "OK")]
    Ok,
}

impl StockStatus {
    /// Low when the counter has fallen to the configured limit or below.
    pub fn derive(quantity: i32, low_stock_limit: i32) -> Self {
        if quantity <= low_stock_limit {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "Low",
            StockStatus::Ok => "OK",
        }
    }
}

/// Stock left after delivering `delivered` units, clamped at zero.
pub fn quantity_after_delivery(on_hand: i32, delivered: i32) -> i32 {
    (on_hand - delivered).max(0)
}

/// Signed correction recorded when a physical count disagrees with the
/// running counter.
pub fn adjustment_change(counted: i32, on_hand: i32) -> i32 {
    counted - on_hand
}

/// Current location of a product: destination of its latest transfer, or the
/// default warehouse when it has never moved.
pub fn resolve_location(latest_destination: Option<String>) -> String {
    latest_destination.unwrap_or_else(|| DEFAULT_LOCATION.to_string())
}

/// One row of the product listing view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOverview {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub stock: i32,
    pub status: StockStatus,
    pub location: String,
}
