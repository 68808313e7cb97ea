//! Business logic services for StockMaster

pub mod adjustment;
pub mod auth;
pub mod dashboard;
pub mod delivery;
pub mod product;
pub mod receipt;
pub mod reference;
pub mod transfer;

pub use adjustment::AdjustmentService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use delivery::DeliveryService;
pub use product::ProductService;
pub use receipt::ReceiptService;
pub use transfer::TransferService;
