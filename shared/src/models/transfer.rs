//! Internal transfer model and status machine

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InvalidTransition, UnknownStatus};

/// A movement of one product between locations.
///
/// Transfers never change the stock counter; their only derived effect is the
/// product's current location (destination of the latest transfer by date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub product_id: Uuid,
    pub reference: String,
    pub from_location: String,
    pub to_location: String,
    pub quantity: i32,
    pub status: TransferStatus,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Transfer lifecycle: `Waiting -> InTransit -> Completed`, cancellable
/// before completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Waiting,
    InTransit,
    Completed,
    Cancelled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Waiting => "waiting",
            TransferStatus::InTransit => "in_transit",
            TransferStatus::Completed => "completed",
            TransferStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (TransferStatus::Waiting, TransferStatus::InTransit)
                | (TransferStatus::Waiting, TransferStatus::Cancelled)
                | (TransferStatus::InTransit, TransferStatus::Completed)
                | (TransferStatus::InTransit, TransferStatus::Cancelled)
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

impl FromStr for TransferStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(TransferStatus::Waiting),
            "in_transit" => Ok(TransferStatus::InTransit),
            "completed" => Ok(TransferStatus::Completed),
            "cancelled" => Ok(TransferStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
