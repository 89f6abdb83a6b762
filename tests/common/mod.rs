#![allow(dead_code)]

use bandtrader::domain::driver::DriverConfig;
use bandtrader::domain::error::BandtraderError;
pub use bandtrader::domain::tick::Tick;
use bandtrader::ports::data_port::DataPort;
use chrono::DateTime;
use rust_decimal_macros::dec;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Tick>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_ticks(mut self, symbol: &str, ticks: Vec<Tick>) -> Self {
        self.data.insert(symbol.to_string(), ticks);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_intraday(&self, symbol: &str) -> Result<Vec<Tick>, BandtraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(BandtraderError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(ticks) if !ticks.is_empty() => Ok(ticks.clone()),
            _ => Err(BandtraderError::NoData {
                symbol: symbol.to_string(),
            }),
        }
    }
}

/// Three-minute candles starting at a fixed morning open.
pub fn make_ticks(prices: &[&str]) -> Vec<Tick> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| Tick {
            time: DateTime::from_timestamp(1_700_000_000 + 180 * i as i64, 0)
                .unwrap()
                .naive_utc(),
            price: p.parse().unwrap(),
            volume: 1000 + i as i64,
        })
        .collect()
}

pub fn sample_driver_config() -> DriverConfig {
    DriverConfig {
        symbol: "BABA.US".into(),
        window: 3,
        num_std: 1.0,
        buy_quantity: 10,
        initial_capital: dec!(10000),
    }
}
