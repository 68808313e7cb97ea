//! Derived operations timeline
//!
//! The timeline is a read model projected from the per-type tables at query
//! time; there is no stored operations log to drift out of sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of operational records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Receipt,
    Delivery,
    Transfer,
    Adjustment,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Receipt => "receipt",
            OperationKind::Delivery => "delivery",
            OperationKind::Transfer => "transfer",
            OperationKind::Adjustment => "adjustment",
        }
    }

    /// Prefix stamped on generated reference codes.
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            OperationKind::Receipt => "REC",
            OperationKind::Delivery => "DEL",
            OperationKind::Transfer => "TRF",
            OperationKind::Adjustment => "ADJ",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "receipt" => Some(OperationKind::Receipt),
            "delivery" => Some(OperationKind::Delivery),
            "transfer" => Some(OperationKind::Transfer),
            "adjustment" => Some(OperationKind::Adjustment),
            _ => None,
        }
    }
}

/// Product fields attached to a timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
}

/// One entry in the combined, date-descending operations timeline.
///
/// `quantity` carries the adjustment's signed change for adjustment entries.
/// `status` is the per-type status string; the timeline is denormalized so it
/// stays a plain string here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationEntry {
    pub id: Uuid,
    pub kind: OperationKind,
    pub reference: String,
    pub product: ProductRef,
    pub quantity: i32,
    pub status: String,
    pub date: DateTime<Utc>,
}
