//! Report generation port trait.

use crate::domain::error::BandtraderError;
use crate::domain::ledger::Ledger;

/// Port for rendering the final account summary and trade log.
pub trait ReportPort {
    fn write(&self, ledger: &Ledger) -> Result<(), BandtraderError>;
}
