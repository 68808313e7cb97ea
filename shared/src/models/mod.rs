//! Domain models for StockMaster

use thiserror::Error;

pub mod adjustment;
pub mod delivery;
pub mod operation;
pub mod product;
pub mod receipt;
pub mod transfer;
pub mod user;

pub use adjustment::{Adjustment, AdjustmentStatus};
pub use delivery::{Delivery, DeliveryStatus};
pub use operation::{OperationEntry, OperationKind, ProductRef};
pub use product::{
    adjustment_change, quantity_after_delivery, resolve_location, Product, ProductOverview,
    StockStatus, DEFAULT_LOCATION,
};
pub use receipt::{Receipt, ReceiptStatus};
pub use transfer::{Transfer, TransferStatus};
pub use user::User;

/// A stored status string that does not name a known state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status value: {0}")]
pub struct UnknownStatus(pub String);

/// A status transition the state machine does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub to: &'static str,
}
