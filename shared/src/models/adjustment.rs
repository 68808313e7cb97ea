//! Stock adjustment model

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnknownStatus;

/// A stock correction recorded after a physical count.
///
/// `change` is the signed delta between the counted quantity and the running
/// counter at the time of the count; the counter is overwritten to the
/// counted value in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub product_id: Uuid,
    pub reference: String,
    pub change: i32,
    pub reason: String,
    pub status: AdjustmentStatus,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Adjustments are applied the moment they are recorded, so the machine has a
/// single terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentStatus {
    Completed,
}

impl AdjustmentStatus {
    pub fn as_str(&self) -> &'static str {
        "completed"
    }

    pub fn is_terminal(self) -> bool {
        true
    }
}

impl FromStr for AdjustmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(AdjustmentStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
