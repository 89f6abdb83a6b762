//! Market data access port trait.

use crate::domain::error::BandtraderError;
use crate::domain::tick::Tick;

pub trait DataPort {
    /// Fetch the full intraday series for one symbol, ordered by time.
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Tick>, BandtraderError>;
}
