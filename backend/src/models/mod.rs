//! Database models for StockMaster
//!
//! Re-exports models from the shared crate; row types private to each
//! service live alongside the queries that produce them.

pub use shared::models::*;
