//! Intraday price sample representation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// One intraday sample: trading timestamp, traded price, cumulative volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub time: NaiveDateTime,
    pub price: Decimal,
    pub volume: i64,
}

impl Tick {
    /// Price as `f64` for indicator math. Ledger state stays in `Decimal`;
    /// the band computation tolerates the float round-trip.
    pub fn price_f64(&self) -> f64 {
        self.price.to_f64().unwrap_or(f64::NAN)
    }
}
