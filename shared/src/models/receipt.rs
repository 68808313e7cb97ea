//! Stock receipt model and status machine

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InvalidTransition, UnknownStatus};

/// An expected or completed goods-in event for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub product_id: Uuid,
    pub reference: String,
    pub supplier: String,
    pub quantity: i32,
    pub status: ReceiptStatus,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Receipt lifecycle: `Waiting -> Received | Cancelled`.
///
/// Marking a receipt received is the transition that adds its quantity to the
/// product's stock counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Waiting,
    Received,
    Cancelled,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Waiting => "waiting",
            ReceiptStatus::Received => "received",
            ReceiptStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ReceiptStatus::Received | ReceiptStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (ReceiptStatus::Waiting, ReceiptStatus::Received)
                | (ReceiptStatus::Waiting, ReceiptStatus::Cancelled)
        )
    }

    pub fn transition_to(self, next: Self) -> Result<Self, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl FromStr for ReceiptStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(ReceiptStatus::Waiting),
            "received" => Ok(ReceiptStatus::Received),
            "cancelled" => Ok(ReceiptStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
