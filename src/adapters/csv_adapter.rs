//! CSV file intraday data adapter.
//!
//! Expects `<base_path>/<SYMBOL>.csv` with a header row and
//! `timestamp,price,volume` records, where `timestamp` is unix seconds.

use crate::domain::error::BandtraderError;
use crate::domain::tick::Tick;
use crate::ports::data_port::DataPort;
use chrono::DateTime;
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}.csv"))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Tick>, BandtraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| BandtraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut ticks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BandtraderError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let timestamp: i64 = record
                .get(0)
                .ok_or_else(|| BandtraderError::Data {
                    reason: "missing timestamp column".into(),
                })?
                .parse()
                .map_err(|e| BandtraderError::Data {
                    reason: format!("invalid timestamp value: {e}"),
                })?;
            let time = DateTime::from_timestamp(timestamp, 0)
                .ok_or_else(|| BandtraderError::Data {
                    reason: format!("timestamp out of range: {timestamp}"),
                })?
                .naive_utc();

            let price: Decimal = record
                .get(1)
                .ok_or_else(|| BandtraderError::Data {
                    reason: "missing price column".into(),
                })?
                .parse()
                .map_err(|e| BandtraderError::Data {
                    reason: format!("invalid price value: {e}"),
                })?;

            let volume: i64 = record
                .get(2)
                .ok_or_else(|| BandtraderError::Data {
                    reason: "missing volume column".into(),
                })?
                .parse()
                .map_err(|e| BandtraderError::Data {
                    reason: format!("invalid volume value: {e}"),
                })?;

            ticks.push(Tick {
                time,
                price,
                volume,
            });
        }

        if ticks.is_empty() {
            return Err(BandtraderError::NoData {
                symbol: symbol.to_string(),
            });
        }

        ticks.sort_by_key(|t| t.time);
        Ok(ticks)
    }
}
