//! bandtrader — single-symbol Bollinger band intraday backtester.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`]. The stateful core is
//! [`domain::ledger::Ledger`]; everything else feeds it prices or renders
//! its trade log.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
