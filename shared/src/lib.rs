//! Shared types and models for StockMaster
//!
//! This crate contains the domain types shared between the backend and its
//! test suites: entity models, status state machines, reference-code helpers,
//! and input validation. It performs no I/O.

pub mod models;
pub mod reference;
pub mod validation;

pub use models::*;
pub use reference::*;
pub use validation::*;
