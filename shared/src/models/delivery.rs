//! Outbound delivery model and status machine

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InvalidTransition, UnknownStatus};

/// An outbound shipment of one product to a customer.
///
/// Creating a delivery decrements the product's stock counter immediately;
/// later status changes do not touch stock again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub product_id: Uuid,
    pub reference: String,
    pub customer: String,
    pub quantity: i32,
    pub status: DeliveryStatus,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Delivery lifecycle: `Draft -> InTransit -> Delivered`, cancellable before
/// the goods arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Draft,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Draft => "draft",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (DeliveryStatus::Draft, DeliveryStatus::InTransit)
                | (DeliveryStatus::Draft, DeliveryStatus::Cancelled)
                | (DeliveryStatus::InTransit, DeliveryStatus::Delivered)
                | (DeliveryStatus::InTransit, DeliveryStatus::Cancelled)
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

impl FromStr for DeliveryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DeliveryStatus::Draft),
            "in_transit" => Ok(DeliveryStatus::InTransit),
            "delivered" => Ok(DeliveryStatus::Delivered),
            "cancelled" => Ok(DeliveryStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
