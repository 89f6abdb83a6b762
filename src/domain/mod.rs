//! Core domain types and logic.

pub mod tick;
pub mod ledger;
pub mod bollinger;
pub mod driver;
pub mod config_validation;
pub mod error;
